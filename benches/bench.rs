// Criterion benchmarks for Compass Fit

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use compass_fit::core::{compose_match, score_industry, score_tags, score_title};
use compass_fit::models::{
    CompanySizeTier, Contact, PricingModel, Product, ScoreWeights, ValueProposition,
};

fn create_product() -> Product {
    Product {
        id: "prod_analytics".to_string(),
        name: "Compass Analytics".to_string(),
        category: "analytics".to_string(),
        target_industries: vec!["SaaS".to_string(), "Fintech".to_string(), "Retail".to_string()],
        target_company_sizes: vec![CompanySizeTier::Smb, CompanySizeTier::MidMarket],
        target_titles: vec!["VP".to_string(), "Director".to_string(), "Head".to_string()],
        target_departments: vec!["Sales".to_string(), "Marketing".to_string()],
        features: vec![
            "dashboards".to_string(),
            "forecasting".to_string(),
            "alerts".to_string(),
        ],
        pain_points_addressed: vec![
            "manual reporting".to_string(),
            "pipeline blind spots".to_string(),
        ],
        use_cases: vec!["quarterly forecast reviews".to_string()],
        competitive_advantages: vec!["native CRM sync".to_string()],
        value_propositions: vec![ValueProposition {
            title: "Faster closes".to_string(),
            description: "Cut reporting time in half".to_string(),
        }],
        pricing_model: PricingModel::Subscription,
    }
}

fn create_contact(id: usize) -> Contact {
    let industries = ["SaaS", "Fintech", "Healthcare", "Retail"];
    let titles = ["VP of Sales", "Director of Operations", "CEO", "Account Executive"];
    let sizes = ["11-50", "51-200", "201-500", "1000+"];
    let statuses = ["qualified", "contacted", "closed-lost", "hot"];

    Contact {
        id: format!("cont_{}", id),
        name: format!("Contact {}", id),
        industry: Some(industries[id % industries.len()].to_string()),
        company_size: Some(sizes[id % sizes.len()].to_string()),
        title: Some(titles[id % titles.len()].to_string()),
        department: if id % 3 == 0 { Some("Sales".to_string()) } else { None },
        tags: vec!["forecasting".to_string(), "budget-holder".to_string()],
        status: Some(statuses[id % statuses.len()].to_string()),
        created_at: None,
    }
}

fn bench_factor_scorers(c: &mut Criterion) {
    let product = create_product();
    let contact = create_contact(1);

    c.bench_function("score_industry", |b| {
        b.iter(|| score_industry(black_box(&product), black_box(&contact), black_box(25)));
    });

    c.bench_function("score_title", |b| {
        b.iter(|| score_title(black_box(&product), black_box(&contact), black_box(25)));
    });

    c.bench_function("score_tags", |b| {
        b.iter(|| score_tags(black_box(&product), black_box(&contact), black_box(15)));
    });
}

fn bench_compose_match(c: &mut Criterion) {
    let product = create_product();
    let contact = create_contact(1);
    let weights = ScoreWeights::default();

    c.bench_function("compose_match", |b| {
        b.iter(|| compose_match(black_box(&product), black_box(&contact), black_box(&weights)));
    });
}

fn bench_batch_composition(c: &mut Criterion) {
    let product = create_product();
    let weights = ScoreWeights::default();

    let mut group = c.benchmark_group("batch_composition");

    for contact_count in [10, 50, 100, 500, 1000].iter() {
        let contacts: Vec<Contact> = (0..*contact_count).map(create_contact).collect();

        group.bench_with_input(
            BenchmarkId::new("compose_all", contact_count),
            contact_count,
            |b, _| {
                b.iter(|| {
                    let results: Vec<_> = contacts
                        .iter()
                        .map(|contact| {
                            compose_match(black_box(&product), black_box(contact), &weights)
                        })
                        .collect();
                    black_box(results)
                });
            },
        );
    }

    group.finish();
}

fn bench_keyword_pool(c: &mut Criterion) {
    let product = create_product();

    c.bench_function("keyword_pool", |b| {
        b.iter(|| black_box(&product).keyword_pool());
    });
}

criterion_group!(
    benches,
    bench_factor_scorers,
    bench_compose_match,
    bench_batch_composition,
    bench_keyword_pool
);

criterion_main!(benches);
