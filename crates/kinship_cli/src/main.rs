//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `kinship_core` linkage and print the core version.
//! - Wire every list store to in-memory services and page through a sample
//!   family, printing what a list screen would render.
//!
//! Environment: `KINSHIP_LOG_DIR` enables file logging (absolute path),
//! `KINSHIP_LOG_LEVEL` overrides the default level, `KINSHIP_*` store
//! overrides are documented on `StoreConfig::from_env`.

mod demo;

use kinship_core::model::member::MemberFilter;
use kinship_core::{
    default_log_level, drain_pages, init_logging, AppStores, ListAdapter, MemberService,
    StoreConfig,
};
use std::process::ExitCode;

const MAX_DEMO_PAGES: u32 = 10;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    println!("kinship_core version={}", kinship_core::core_version());

    if let Err(message) = configure_logging() {
        eprintln!("logging disabled: {message}");
    }

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let fixture = demo::DemoFixture::new();
    let stores = AppStores::new(fixture.services(), config);

    let families = drain_pages(
        &stores.family_list(),
        stores.families().query(Default::default()),
        MAX_DEMO_PAGES,
    )
    .await;
    println!(
        "families loaded={} total={:?} error={:?}",
        families.items.len(),
        families.total_items,
        families.error
    );
    for family in &families.items {
        println!("  family {} ({} members)", family.name, family.member_count);
    }

    let unscoped: ListAdapter<MemberService> = stores.member_list(None);
    if unscoped.refresh(unscoped.query(MemberFilter::default())).await.is_none() {
        println!("members without family: error={:?}", unscoped.error());
    }

    let members = stores.member_list(Some(fixture.family_id()));
    let view = drain_pages(
        &members,
        members.query(MemberFilter {
            living_only: true,
            ..MemberFilter::default()
        }),
        MAX_DEMO_PAGES,
    )
    .await;
    println!(
        "members pages={} loaded={} has_more={} error={:?}",
        view.page,
        view.items.len(),
        view.has_more,
        view.error
    );
    for member in &view.items {
        println!("  member {}", member.full_name);
    }

    stores.reset_all();
    println!("after reset members loaded={}", stores.members().items().len());
    ExitCode::SUCCESS
}

fn configure_logging() -> Result<(), String> {
    let Some(log_dir) = std::env::var("KINSHIP_LOG_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
    else {
        return Ok(());
    };
    let level = std::env::var("KINSHIP_LOG_LEVEL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, &log_dir).map_err(|err| err.to_string())?;
    log::info!("event=cli_start module=cli status=ok");
    Ok(())
}
