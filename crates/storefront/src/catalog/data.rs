//! Built-in jersey catalog.

use kitbag_core::{Price, Product, ProductId, ProductKind, Size};

use Size::{L, M, S, XL, XXL};

struct Seed {
    id: &'static str,
    name: &'static str,
    team: &'static str,
    cents: i64,
    image: &'static str,
    description: &'static str,
    sizes: &'static [Size],
    featured: bool,
    kind: ProductKind,
    country: Option<&'static str>,
    player: Option<&'static str>,
    year: Option<u16>,
}

impl Seed {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name.to_string(),
            team: self.team.to_string(),
            price: Price::from_cents(self.cents),
            image: self.image.to_string(),
            gallery_images: Vec::new(),
            description: self.description.to_string(),
            sizes: self.sizes.to_vec(),
            is_featured: self.featured,
            kind: self.kind,
            country: self.country.map(str::to_string),
            player: self.player.map(str::to_string),
            year: self.year,
        }
    }
}

const SEEDS: [Seed; 14] = [
    Seed {
        id: "rma-home-2024",
        name: "Real Madrid Home Jersey 24/25",
        team: "Real Madrid",
        cents: 9000,
        image: "/images/real_madrid_home.webp",
        description: "Official Real Madrid home jersey for the 2024/25 season. Features AEROREADY technology, classic white design with elegant black and gold accents. Made with recycled materials.",
        sizes: &[S, M, L, XL, XXL],
        featured: true,
        kind: ProductKind::Club,
        country: None,
        player: None,
        year: None,
    },
    Seed {
        id: "manutd-away-2024",
        name: "Man Utd Away Jersey 24/25",
        team: "Manchester United",
        cents: 8500,
        image: "/images/man_united_away.avif",
        description: "Official Manchester United away jersey for the 2024/25 season. Lightweight and breathable, designed for peak performance. Bold new color scheme.",
        sizes: &[S, M, L, XL],
        featured: true,
        kind: ProductKind::Club,
        country: None,
        player: None,
        year: None,
    },
    Seed {
        id: "barca-training-kit",
        name: "FC Barcelona Training Kit",
        team: "FC Barcelona",
        cents: 6000,
        image: "/images/barcelona_training.webp",
        description: "FC Barcelona training kit, perfect for your workout sessions or casual wear. Stay cool and comfortable while showing your support.",
        sizes: &[M, L, XL],
        featured: false,
        kind: ProductKind::Training,
        country: None,
        player: None,
        year: None,
    },
    Seed {
        id: "liverpool-third-2024",
        name: "Liverpool FC Third Kit 24/25",
        team: "Liverpool FC",
        cents: 8800,
        image: "/images/liverpool_third.jpg",
        description: "Liverpool FC's striking third kit for the upcoming season. Unique design with advanced moisture-wicking fabric.",
        sizes: &[S, M, L, XL, XXL],
        featured: true,
        kind: ProductKind::Club,
        country: None,
        player: None,
        year: None,
    },
    Seed {
        id: "bayern-home-2024",
        name: "Bayern Munich Home Jersey 24/25",
        team: "Bayern Munich",
        cents: 9200,
        image: "/images/bayern_home.jpg",
        description: "Classic red Bayern Munich home jersey. Embrace the spirit of the Bavarian giants.",
        sizes: &[S, M, L, XL],
        featured: false,
        kind: ProductKind::Club,
        country: None,
        player: None,
        year: None,
    },
    Seed {
        id: "psg-home-2024",
        name: "PSG Home Jersey 24/25",
        team: "Paris Saint-Germain",
        cents: 9500,
        image: "/images/psg_home.jpg",
        description: "Official PSG home jersey. Represent your favorite Parisian club with style.",
        sizes: &[S, M, L, XL],
        featured: false,
        kind: ProductKind::Club,
        country: None,
        player: None,
        year: None,
    },
    Seed {
        id: "arsenal-away-2024",
        name: "Arsenal Away Jersey 24/25",
        team: "Arsenal",
        cents: 8700,
        image: "/images/arsenal_away.jpg",
        description: "New Arsenal away kit. Designed for the gunners, featuring a modern look.",
        sizes: &[S, M, L, XL, XXL],
        featured: false,
        kind: ProductKind::Club,
        country: None,
        player: None,
        year: None,
    },
    Seed {
        id: "juventus-home-2024",
        name: "Juventus Home Jersey 24/25",
        team: "Juventus",
        cents: 8900,
        image: "/images/juventus_home.jpg",
        description: "The iconic black and white stripes of Juventus. Show your allegiance to the Old Lady.",
        sizes: &[S, M, L],
        featured: false,
        kind: ProductKind::Club,
        country: None,
        player: None,
        year: None,
    },
    Seed {
        id: "argentina-home-2022-messi",
        name: "Argentina Home Jersey 2022 (Messi)",
        team: "Argentina National Team",
        cents: 10000,
        image: "/images/argentina_home_messi.webp",
        description: "Official Argentina home jersey from the 2022 World Cup, featuring Messi's name and number.",
        sizes: &[S, M, L, XL],
        featured: true,
        kind: ProductKind::Player,
        country: Some("Argentina"),
        player: Some("Messi"),
        year: None,
    },
    Seed {
        id: "brazil-away-2022-neymar",
        name: "Brazil Away Jersey 2022 (Neymar)",
        team: "Brazil National Team",
        cents: 9800,
        image: "/images/brazil_away_neymar.webp",
        description: "Brazil away jersey from the 2022 season, with Neymar's name and number.",
        sizes: &[M, L, XL],
        featured: false,
        kind: ProductKind::Player,
        country: Some("Brazil"),
        player: Some("Neymar Jr."),
        year: None,
    },
    Seed {
        id: "england-home-1998",
        name: "England Home Jersey 1998 (Retro)",
        team: "England National Team",
        cents: 12000,
        image: "/images/england_home_1998_retro.webp",
        description: "Classic England home jersey from the 1998 World Cup. A true retro gem.",
        sizes: &[M, L, XL],
        featured: false,
        kind: ProductKind::Retro,
        country: Some("England"),
        player: None,
        year: Some(1998),
    },
    Seed {
        id: "germany-home-1990",
        name: "West Germany Home Jersey 1990 (Retro)",
        team: "West Germany National Team",
        cents: 13000,
        image: "/images/germany_home_1990_retro.webp",
        description: "Iconic West Germany home jersey from their 1990 World Cup victory.",
        sizes: &[L, XL],
        featured: true,
        kind: ProductKind::Retro,
        country: Some("Germany"),
        player: None,
        year: Some(1990),
    },
    Seed {
        id: "spain-home-2024",
        name: "Spain Home Jersey 24/25",
        team: "Spain National Team",
        cents: 9000,
        image: "/images/spain_home.webp",
        description: "Official Spain home jersey for the 2024/25 season.",
        sizes: &[S, M, L, XL],
        featured: false,
        kind: ProductKind::Country,
        country: Some("Spain"),
        player: None,
        year: None,
    },
    Seed {
        id: "italy-away-2024",
        name: "Italy Away Jersey 24/25",
        team: "Italy National Team",
        cents: 8800,
        image: "/images/italy_away.webp",
        description: "New Italy away jersey for the upcoming season.",
        sizes: &[M, L, XL, XXL],
        featured: false,
        kind: ProductKind::Country,
        country: Some("Italy"),
        player: None,
        year: None,
    },
];

/// The built-in product list, in catalog order.
pub(super) fn products() -> Vec<Product> {
    SEEDS.into_iter().map(Seed::into_product).collect()
}
