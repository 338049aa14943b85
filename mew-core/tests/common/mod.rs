//! Shared fixtures: a school model nested four records deep, plus Pokemon.
#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone};
use proptest::prelude::*;
use uuid::Uuid;

// Written as `[latitude, longitude]`.
mew_core::tuple_record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GeoPosition {
        pub latitude: f64,
        pub longitude: f64,
    }
}

mew_core::enumeration! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Subject {
        Mathematics = 0,
        English = 1,
        Computing = 2,
    }
}

mew_core::record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Address {
        pub id: Uuid,
        pub door_number: i64,
        pub house_name: Option<String>,
        pub street_name: String,
        pub geo_position: GeoPosition,
    }
}

mew_core::record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Teacher {
        pub id: Uuid,
        pub name: String,
        pub address: Address,
    }
}

mew_core::record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Lecture {
        pub id: Uuid,
        pub name: String,
        pub timestamp: DateTime<FixedOffset>,
        pub teacher: Teacher,
        pub subject: Subject,
    }
}

mew_core::record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Student {
        pub id: Uuid,
        pub name: String,
        pub address: Address,
        pub lectures: Vec<Lecture> = Vec::new(),
    }
}

mew_core::enumeration! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum PokemonType {
        Normal = "normal",
        Electric = "electric",
        Fire = "fire",
        Fighting = "fighting",
        Water = "water",
        Psychic = "psychic",
    }
}

mew_core::record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Pokemon {
        pub name: String,
        pub pokedex: i64,
        pub r#type: PokemonType,
        pub abilities: Vec<String>,
    }
}

pub fn pikachu() -> Pokemon {
    Pokemon {
        name: "Pikachu".to_string(),
        pokedex: 25,
        r#type: PokemonType::Electric,
        abilities: vec!["static".to_string(), "lightning rod".to_string()],
    }
}

pub fn oak_street() -> Address {
    Address {
        id: Uuid::parse_str("10fb6968-6b54-44c8-9365-e0b3934ae156").unwrap(),
        door_number: 5,
        house_name: None,
        street_name: "Oak".to_string(),
        geo_position: GeoPosition {
            latitude: 51.5,
            longitude: 0.25,
        },
    }
}

// Strategies

/// Plain text plus strings a YAML emitter has to quote.
pub fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z0-9 _.-]{0,16}",
        1 => prop::sample::select(vec!["", "5", "true", "null", " padded ", "line\nbreak", "h\u{e9}llo w\u{f6}rld"])
            .prop_map(str::to_string),
    ]
}

pub fn uuids() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

pub fn geo_positions() -> impl Strategy<Value = GeoPosition> {
    (-90.0f64..=90.0, 0.0f64..=180.0).prop_map(|(latitude, longitude)| GeoPosition {
        latitude,
        longitude,
    })
}

pub fn addresses() -> impl Strategy<Value = Address> {
    (
        uuids(),
        any::<i64>(),
        proptest::option::of(text()),
        text(),
        geo_positions(),
    )
        .prop_map(|(id, door_number, house_name, street_name, geo_position)| Address {
            id,
            door_number,
            house_name,
            street_name,
            geo_position,
        })
}

pub fn timestamps() -> impl Strategy<Value = DateTime<FixedOffset>> {
    // Years 5 to 9000 in UTC, whole-minute offsets up to +-23:59.
    (
        -62_000_000_000i64..250_000_000_000i64,
        0u32..1_000_000_000,
        -1439i32..=1439,
    )
        .prop_map(|(secs, nanos, offset_minutes)| {
            let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
            let utc = DateTime::from_timestamp(secs, nanos).unwrap();
            offset.from_utc_datetime(&utc.naive_utc())
        })
}

pub fn subjects() -> impl Strategy<Value = Subject> {
    prop_oneof![
        Just(Subject::Mathematics),
        Just(Subject::English),
        Just(Subject::Computing),
    ]
}

pub fn teachers() -> impl Strategy<Value = Teacher> {
    (uuids(), text(), addresses()).prop_map(|(id, name, address)| Teacher { id, name, address })
}

pub fn lectures() -> impl Strategy<Value = Lecture> {
    (uuids(), text(), timestamps(), teachers(), subjects()).prop_map(
        |(id, name, timestamp, teacher, subject)| Lecture {
            id,
            name,
            timestamp,
            teacher,
            subject,
        },
    )
}

pub fn students() -> impl Strategy<Value = Student> {
    (
        uuids(),
        text(),
        addresses(),
        proptest::collection::vec(lectures(), 0..5),
    )
        .prop_map(|(id, name, address, lectures)| Student {
            id,
            name,
            address,
            lectures,
        })
}
