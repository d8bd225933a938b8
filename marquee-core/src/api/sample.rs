use marquee_model::{
    CastMember, LocalizedText, MediaId, MediaItem, MediaStatus, MediaType,
};

struct Seed {
    id: &'static str,
    en: &'static str,
    zh: &'static str,
    rating: f32,
    year: u16,
    media_type: MediaType,
    status: MediaStatus,
    genres: &'static [&'static str],
    cast: &'static [(&'static str, &'static str)],
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        en: "Dune",
        zh: "沙丘",
        rating: 8.0,
        year: 2021,
        media_type: MediaType::Movie,
        status: MediaStatus::Released,
        genres: &["Science Fiction", "Adventure"],
        cast: &[("Timothée Chalamet", "Paul Atreides"), ("Zendaya", "Chani")],
    },
    Seed {
        id: "2",
        en: "Dune: Part Two",
        zh: "沙丘2",
        rating: 8.6,
        year: 2024,
        media_type: MediaType::Movie,
        status: MediaStatus::Released,
        genres: &["Science Fiction", "Adventure"],
        cast: &[("Timothée Chalamet", "Paul Atreides"), ("Austin Butler", "Feyd-Rautha")],
    },
    Seed {
        id: "3",
        en: "Arrival",
        zh: "降临",
        rating: 7.9,
        year: 2016,
        media_type: MediaType::Movie,
        status: MediaStatus::Released,
        genres: &["Science Fiction", "Drama"],
        cast: &[("Amy Adams", "Louise Banks")],
    },
    Seed {
        id: "4",
        en: "The Three-Body Problem",
        zh: "三体",
        rating: 7.5,
        year: 2023,
        media_type: MediaType::TvShow,
        status: MediaStatus::Released,
        genres: &["Science Fiction", "Mystery"],
        cast: &[("Zhang Luyi", "Wang Miao"), ("Yu Hewei", "Shi Qiang")],
    },
    Seed {
        id: "5",
        en: "Blade Runner 2049",
        zh: "银翼杀手2049",
        rating: 8.0,
        year: 2017,
        media_type: MediaType::Movie,
        status: MediaStatus::Released,
        genres: &["Science Fiction", "Drama"],
        cast: &[("Ryan Gosling", "K")],
    },
    Seed {
        id: "6",
        en: "Severance",
        zh: "人生切割术",
        rating: 8.7,
        year: 2022,
        media_type: MediaType::TvShow,
        status: MediaStatus::Ongoing,
        genres: &["Drama", "Mystery", "Thriller"],
        cast: &[("Adam Scott", "Mark Scout")],
    },
    Seed {
        id: "7",
        en: "The Wandering Earth",
        zh: "流浪地球",
        rating: 6.9,
        year: 2019,
        media_type: MediaType::Movie,
        status: MediaStatus::Released,
        genres: &["Science Fiction", "Action"],
        cast: &[("Wu Jing", "Liu Peiqiang")],
    },
    Seed {
        id: "8",
        en: "Foundation",
        zh: "基地",
        rating: 7.4,
        year: 2021,
        media_type: MediaType::TvShow,
        status: MediaStatus::Ongoing,
        genres: &["Science Fiction", "Drama"],
        cast: &[("Jared Harris", "Hari Seldon"), ("Lee Pace", "Brother Day")],
    },
    Seed {
        id: "9",
        en: "Interstellar",
        zh: "星际穿越",
        rating: 8.7,
        year: 2014,
        media_type: MediaType::Movie,
        status: MediaStatus::Released,
        genres: &["Science Fiction", "Drama", "Adventure"],
        cast: &[("Matthew McConaughey", "Cooper")],
    },
    Seed {
        id: "10",
        en: "Spirited Away",
        zh: "千与千寻",
        rating: 8.6,
        year: 2001,
        media_type: MediaType::Movie,
        status: MediaStatus::Released,
        genres: &["Animation", "Fantasy", "Family"],
        cast: &[("Rumi Hiiragi", "Chihiro")],
    },
    Seed {
        id: "11",
        en: "The Last of Us",
        zh: "最后生还者",
        rating: 8.7,
        year: 2023,
        media_type: MediaType::TvShow,
        status: MediaStatus::Ongoing,
        genres: &["Drama", "Action"],
        cast: &[("Pedro Pascal", "Joel"), ("Bella Ramsey", "Ellie")],
    },
    Seed {
        id: "12",
        en: "Parasite",
        zh: "寄生虫",
        rating: 8.5,
        year: 2019,
        media_type: MediaType::Movie,
        status: MediaStatus::Released,
        genres: &["Thriller", "Drama", "Comedy"],
        cast: &[("Song Kang-ho", "Kim Ki-taek")],
    },
    Seed {
        id: "13",
        en: "Shogun",
        zh: "幕府将军",
        rating: 8.6,
        year: 2024,
        media_type: MediaType::TvShow,
        status: MediaStatus::Released,
        genres: &["Drama", "History", "War"],
        cast: &[("Hiroyuki Sanada", "Yoshii Toranaga")],
    },
    Seed {
        id: "14",
        en: "Dune: Prophecy",
        zh: "沙丘：预言",
        rating: 7.2,
        year: 2024,
        media_type: MediaType::TvShow,
        status: MediaStatus::Ongoing,
        genres: &["Science Fiction", "Drama"],
        cast: &[("Emily Watson", "Valya Harkonnen")],
    },
    Seed {
        id: "15",
        en: "Project Hail Mary",
        zh: "挽救计划",
        rating: 0.0,
        year: 2026,
        media_type: MediaType::Movie,
        status: MediaStatus::Upcoming,
        genres: &["Science Fiction", "Adventure"],
        cast: &[("Ryan Gosling", "Ryland Grace")],
    },
    Seed {
        id: "16",
        en: "In the Mood for Love",
        zh: "花样年华",
        rating: 8.1,
        year: 2000,
        media_type: MediaType::Movie,
        status: MediaStatus::Released,
        genres: &["Drama", "Romance"],
        cast: &[("Tony Leung", "Chow Mo-wan"), ("Maggie Cheung", "Su Li-zhen")],
    },
];

/// Built-in catalog used by the offline CLI mode and the tests.
pub fn sample_items() -> Vec<MediaItem> {
    SEEDS
        .iter()
        .map(|seed| MediaItem {
            id: MediaId::new(seed.id),
            title: LocalizedText::new(seed.en, seed.zh),
            overview: LocalizedText::default(),
            poster: format!("/posters/{}.jpg", seed.id),
            rating: seed.rating,
            year: seed.year,
            media_type: seed.media_type,
            status: seed.status,
            genres: seed.genres.iter().map(|g| g.to_string()).collect(),
            cast: seed
                .cast
                .iter()
                .map(|(name, role)| CastMember {
                    name: name.to_string(),
                    role: role.to_string(),
                })
                .collect(),
        })
        .collect()
}
