use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jobboard::model::CompanyField;
use jobboard::{CompanyFilter, Patch};

/// Build a patch touching every company field `n` times over.
fn build_patch(n: usize) -> Patch<CompanyField> {
    let mut patch = Patch::new();
    for i in 0..n {
        patch = patch
            .set(CompanyField::Name, format!("company-{i}"))
            .set(CompanyField::NumEmployees, i as i32);
    }
    patch
}

fn bench_set_clause(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragment/set_clause");

    for n in [1, 5, 25, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let set = build_patch(n).into_set_clause().unwrap();
                black_box(set.text().len());
            });
        });
    }

    group.finish();
}

fn bench_company_filter(c: &mut Criterion) {
    let filter = CompanyFilter {
        name: Some("net".to_owned()),
        min_employees: Some(5),
        max_employees: Some(500),
    };

    c.bench_function("fragment/company_filter", |b| {
        b.iter(|| {
            let fragment = filter.build().unwrap();
            black_box(fragment.text().len());
        });
    });
}

criterion_group!(benches, bench_set_clause, bench_company_filter);
criterion_main!(benches);
