// Criterion benchmarks for DogMate Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dogmate_algo::core::keywords::{derive_keywords, slugify};
use dogmate_algo::core::{distance::haversine_distance, matcher::nearby, score, search, DogFilter, Matcher};
use dogmate_algo::models::{BreedRecord, Coordinate, Dog, DogStatus, Gender, ScoringWeights};
use uuid::Uuid;

const BREED_NAMES: [&str; 8] = [
    "Labrador Retriever",
    "Golden Retriever",
    "German Shepherd Dog",
    "Cavalier King Charles Spaniel",
    "Border Collie",
    "Staffordshire Bull Terrier",
    "Shih Tzu",
    "Pug",
];

fn create_dog(id: usize, lat: f64, lon: f64) -> Dog {
    Dog {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        name: format!("Dog {}", id),
        breed: BREED_NAMES[id % BREED_NAMES.len()].to_string(),
        gender: if id % 2 == 0 { Gender::Female } else { Gender::Male },
        age: 1 + (id % 10) as i32,
        available: true,
        vaccinated: id % 3 != 0,
        neutered: id % 7 == 0,
        temperament: vec!["Friendly".to_string(), "Loyal".to_string()],
        status: DogStatus::Active,
        address: None,
        city: None,
        county: None,
        postcode: None,
        country: None,
        latitude: Some(lat),
        longitude: Some(lon),
    }
}

fn create_dogs(count: usize) -> Vec<Dog> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.003) % 1.5;
            let lon_offset = (i as f64 * 0.002) % 1.5;
            create_dog(i, 53.4808 + lat_offset - 0.75, -2.2426 + lon_offset - 0.75)
        })
        .collect()
}

fn create_corpus(count: usize) -> Vec<BreedRecord> {
    (0..count)
        .map(|i| {
            let name = format!("{} {}", BREED_NAMES[i % BREED_NAMES.len()], i);
            BreedRecord::new(&name, if i % 2 == 0 { "Gundog" } else { "Toy" })
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(53.4808),
                black_box(-2.2426),
                black_box(53.8008),
                black_box(-1.5491),
            )
        });
    });
}

fn bench_indexing(c: &mut Criterion) {
    c.bench_function("slugify", |b| {
        b.iter(|| slugify(black_box("Dogue de Bordeaux (French Mastiff)")));
    });

    c.bench_function("derive_keywords", |b| {
        b.iter(|| {
            derive_keywords(
                black_box("Cavalier King Charles Spaniel"),
                black_box(Some("Toy")),
                black_box(Some("Companion")),
            )
        });
    });
}

fn bench_breed_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("breed_search");

    for corpus_size in [50, 250, 1000].iter() {
        let corpus = create_corpus(*corpus_size);

        group.bench_with_input(BenchmarkId::new("search", corpus_size), corpus_size, |b, _| {
            b.iter(|| search(black_box("retriever"), corpus.iter(), black_box(20)))
        });
    }

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let weights = ScoringWeights::default();
    let source = create_dog(1, 53.4808, -2.2426);
    let candidate = create_dog(2, 53.8008, -1.5491);

    c.bench_function("score", |b| {
        b.iter(|| score(black_box(&candidate), black_box(&source), &weights));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let source = create_dog(1, 53.4808, -2.2426);

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 100, 1000].iter() {
        let candidates = create_dogs(*candidate_count);

        group.bench_with_input(
            BenchmarkId::new("find_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.find_matches(
                        black_box(&source),
                        black_box(candidates.clone()),
                        black_box(25.0),
                        black_box(20),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_nearby(c: &mut Criterion) {
    let origin = Coordinate { latitude: 53.4808, longitude: -2.2426 };
    let dogs = create_dogs(1000);
    let filter = DogFilter::default();

    c.bench_function("nearby_1000_dogs", |b| {
        b.iter(|| nearby(origin, black_box(50.0), black_box(dogs.clone()), &filter));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_indexing,
    bench_breed_search,
    bench_scoring,
    bench_matching,
    bench_nearby
);

criterion_main!(benches);
