//! In-memory fixture data for the CLI demo.

use kinship_core::model::dictionary::{DictionaryEntry, DictionaryFilter};
use kinship_core::model::event::{
    EventFilter, EventKind, FamilyEvent, FamilyEventUpdate, NewFamilyEvent,
};
use kinship_core::model::face::{Face, FaceFilter, FaceLabel};
use kinship_core::model::family::{Family, FamilyFilter, FamilyUpdate, FamilyVisibility, NewFamily};
use kinship_core::model::member::{Gender, Member, MemberFilter, MemberUpdate, NewMember};
use kinship_core::{AppServices, FamilyId, MemoryEntityService};
use std::convert::Infallible;
use std::sync::Arc;
use uuid::Uuid;

const DEMO_MEMBER_COUNT: usize = 45;
const BASE_EPOCH_MS: i64 = 1_700_000_000_000;
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

pub struct DemoFixture {
    family_id: FamilyId,
    families: Vec<Family>,
    members: Vec<Member>,
    events: Vec<FamilyEvent>,
    faces: Vec<Face>,
    dictionary: Vec<DictionaryEntry>,
}

impl DemoFixture {
    pub fn new() -> Self {
        let family_id = Uuid::new_v4();
        let families = vec![
            Family {
                id: family_id,
                name: "Nguyen".to_string(),
                description: Some("Hue branch".to_string()),
                visibility: FamilyVisibility::Private,
                member_count: DEMO_MEMBER_COUNT as u32,
                created_at: BASE_EPOCH_MS,
            },
            Family {
                id: Uuid::new_v4(),
                name: "Tran".to_string(),
                description: None,
                visibility: FamilyVisibility::Public,
                member_count: 0,
                created_at: BASE_EPOCH_MS + DAY_MS,
            },
        ];

        let members = (0..DEMO_MEMBER_COUNT)
            .map(|index| Member {
                id: Uuid::new_v4(),
                family_id,
                full_name: format!("Nguyen Member {index:02}"),
                gender: Some(if index % 2 == 0 {
                    Gender::Male
                } else {
                    Gender::Female
                }),
                birth_date: Some(BASE_EPOCH_MS - (index as i64) * 365 * DAY_MS),
                is_deceased: index % 9 == 8,
            })
            .collect::<Vec<_>>();

        let events = members
            .iter()
            .take(5)
            .map(|member| FamilyEvent {
                id: Uuid::new_v4(),
                family_id,
                title: format!("Birth of {}", member.full_name),
                kind: EventKind::Birth,
                start_at: member.birth_date.unwrap_or(BASE_EPOCH_MS),
                end_at: None,
                location: Some("Hue".to_string()),
            })
            .collect();

        let faces = members
            .iter()
            .take(3)
            .enumerate()
            .map(|(index, member)| Face {
                id: Uuid::new_v4(),
                family_id,
                photo_id: Uuid::new_v4(),
                member_id: (index > 0).then_some(member.id),
                thumbnail_url: format!("https://example.invalid/faces/{index}.jpg"),
                confidence_pct: 90,
            })
            .collect();

        let dictionary = vec![DictionaryEntry {
            id: Uuid::new_v4(),
            term: "ong noi".to_string(),
            definition: "paternal grandfather".to_string(),
            language: "vi".to_string(),
            category: Some("grandparents".to_string()),
        }];

        Self {
            family_id,
            families,
            members,
            events,
            faces,
            dictionary,
        }
    }

    pub fn family_id(&self) -> FamilyId {
        self.family_id
    }

    pub fn services(&self) -> AppServices {
        AppServices {
            families: Arc::new(
                MemoryEntityService::<Family, FamilyFilter, NewFamily, FamilyUpdate>::new(
                    "family",
                    self.families.clone(),
                )
                .with_creator(|input: NewFamily| Family {
                    id: Uuid::new_v4(),
                    name: input.name,
                    description: input.description,
                    visibility: input.visibility,
                    member_count: 0,
                    created_at: BASE_EPOCH_MS,
                }),
            ),
            members: Arc::new(
                MemoryEntityService::<Member, MemberFilter, NewMember, MemberUpdate>::new(
                    "member",
                    self.members.clone(),
                )
                .with_creator(|input: NewMember| Member {
                    id: Uuid::new_v4(),
                    family_id: input.family_id,
                    full_name: input.full_name,
                    gender: input.gender,
                    birth_date: input.birth_date,
                    is_deceased: false,
                }),
            ),
            events: Arc::new(MemoryEntityService::<
                FamilyEvent,
                EventFilter,
                NewFamilyEvent,
                FamilyEventUpdate,
            >::new("event", self.events.clone())),
            faces: Arc::new(
                MemoryEntityService::<Face, FaceFilter, Infallible, FaceLabel>::new(
                    "face",
                    self.faces.clone(),
                )
                .with_updater(|face: &mut Face, label: FaceLabel| face.member_id = label.member_id),
            ),
            dictionary: Arc::new(MemoryEntityService::<
                DictionaryEntry,
                DictionaryFilter,
                Infallible,
                Infallible,
            >::new("dictionary", self.dictionary.clone())),
        }
    }
}
