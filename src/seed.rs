// Random demo data, for local runs and benchmarks.

use crate::fixture::{Fixture, ListingFixture, RoomFixture, RoomTypeFixture};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

pub const PRICE_CHOICES: [u32; 6] = [50, 70, 90, 100, 150, 300];
pub const ROOM_NUMBERS: [&str; 6] = ["101", "102", "201", "202", "301", "302"];

const ROOM_TITLES: [&str; 3] = ["Single", "Double", "Triple"];
const APARTMENT_TITLES: [&str; 3] = ["Luxurious", "Modern 2 Bed", "Traditional 3 Bed"];
const HOTEL_NAMES: [&str; 8] = [
    "Aurora", "Belvedere", "Cedar", "Driftwood", "Emerald", "Foxglove", "Granite", "Harbour",
];
const PLACES: [(&str, &str); 8] = [
    ("Portugal", "Lisbon"),
    ("Spain", "Valencia"),
    ("France", "Bordeaux"),
    ("Italy", "Turin"),
    ("Greece", "Thessaloniki"),
    ("Croatia", "Zadar"),
    ("Austria", "Innsbruck"),
    ("Norway", "Bergen"),
];

// Shape of the generated dataset.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub hotels: usize,
    pub apartments: usize,
    pub max_room_types_per_hotel: usize,
    pub max_rooms_per_room_type: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            hotels: 10,
            apartments: 10,
            max_room_types_per_hotel: 3,
            max_rooms_per_room_type: 3,
        }
    }
}

fn random_price<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    let price = PRICE_CHOICES.choose(rng).copied().unwrap_or(PRICE_CHOICES[0]);
    Decimal::from(price)
}

fn random_place<R: Rng + ?Sized>(rng: &mut R) -> (String, String) {
    let (country, city) = PLACES.choose(rng).copied().unwrap_or(PLACES[0]);
    (country.to_string(), city.to_string())
}

// `next_room` walks ROOM_NUMBERS across all room types of one hotel.
fn random_room_type<R: Rng + ?Sized>(
    rng: &mut R,
    max_rooms: usize,
    next_room: &mut usize,
) -> RoomTypeFixture {
    let rooms = (0..rng.gen_range(1..=max_rooms.max(1)))
        .map(|_| {
            let room_number = ROOM_NUMBERS[*next_room % ROOM_NUMBERS.len()].to_string();
            *next_room += 1;
            RoomFixture {
                room_number,
                blocked: Vec::new(),
            }
        })
        .collect();

    RoomTypeFixture {
        title: format!("{} Room", ROOM_TITLES.choose(rng).copied().unwrap_or("Double")),
        price: random_price(rng),
        rooms,
    }
}

pub fn random_hotel<R: Rng + ?Sized>(rng: &mut R, config: &SeedConfig) -> ListingFixture {
    let name = HOTEL_NAMES.choose(rng).copied().unwrap_or("Grand");
    let (country, city) = random_place(rng);
    let mut next_room = 0;
    let room_types = (0..rng.gen_range(1..=config.max_room_types_per_hotel.max(1)))
        .map(|_| random_room_type(rng, config.max_rooms_per_room_type, &mut next_room))
        .collect();

    ListingFixture::Hotel {
        title: format!("{} {}* hotel", name, rng.gen_range(1..=6)),
        country,
        city,
        room_types,
    }
}

pub fn random_apartment<R: Rng + ?Sized>(rng: &mut R) -> ListingFixture {
    let (country, city) = random_place(rng);
    ListingFixture::Apartment {
        title: format!(
            "{} Apartment",
            APARTMENT_TITLES.choose(rng).copied().unwrap_or("Modern 2 Bed")
        ),
        country,
        city,
        price: random_price(rng),
        blocked: Vec::new(),
    }
}

/// Generates an unblocked dataset of hotels followed by apartments.
pub fn random_fixture<R: Rng + ?Sized>(rng: &mut R, config: &SeedConfig) -> Fixture {
    let mut listings = Vec::with_capacity(config.hotels + config.apartments);
    for _ in 0..config.hotels {
        listings.push(random_hotel(rng, config));
    }
    for _ in 0..config.apartments {
        listings.push(random_apartment(rng));
    }
    Fixture { listings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_fixture_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = SeedConfig {
            hotels: 4,
            apartments: 3,
            ..SeedConfig::default()
        };

        let fixture = random_fixture(&mut rng, &config);
        assert_eq!(fixture.listings.len(), 7);

        for listing in &fixture.listings {
            match listing {
                ListingFixture::Hotel { title, room_types, .. } => {
                    assert!(title.ends_with("* hotel"));
                    assert!((1..=3).contains(&room_types.len()));
                    for room_type in room_types {
                        assert!((1..=3).contains(&room_type.rooms.len()));
                        assert!(room_type.title.ends_with(" Room"));
                        assert!(PRICE_CHOICES
                            .iter()
                            .any(|p| Decimal::from(*p) == room_type.price));
                    }
                }
                ListingFixture::Apartment { title, price, .. } => {
                    assert!(title.ends_with(" Apartment"));
                    assert!(PRICE_CHOICES.iter().any(|p| Decimal::from(*p) == *price));
                }
            }
        }
    }

    #[test]
    fn test_room_numbers_continue_across_room_types() {
        let config = SeedConfig {
            max_room_types_per_hotel: 2,
            max_rooms_per_room_type: 3,
            ..SeedConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..20 {
            let ListingFixture::Hotel { room_types, .. } = random_hotel(&mut rng, &config) else {
                panic!("expected a hotel");
            };
            let numbers: Vec<&str> = room_types
                .iter()
                .flat_map(|room_type| room_type.rooms.iter())
                .map(|room| room.room_number.as_str())
                .collect();

            assert_eq!(numbers, ROOM_NUMBERS[..numbers.len()].to_vec());
        }
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let config = SeedConfig::default();
        let first = random_fixture(&mut StdRng::seed_from_u64(42), &config);
        let second = random_fixture(&mut StdRng::seed_from_u64(42), &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_fixture_loads_into_inventory() {
        let mut rng = StdRng::seed_from_u64(1);
        let inventory = random_fixture(&mut rng, &SeedConfig::default())
            .into_inventory()
            .unwrap();

        assert_eq!(inventory.listings().count(), 20);
        assert!(inventory.rooms().count() >= 10);
    }
}
