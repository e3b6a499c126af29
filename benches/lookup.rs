use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http::StatusCode;
use waymux::{BoxHttpError, Mux, Request, Response};

fn ok(_req: &mut Request) -> Result<Response, BoxHttpError> {
    Ok(Response::empty(StatusCode::OK))
}

fn sibling_mux(count: usize) -> Mux {
    let mut builder = Mux::builder().redirect_to_slash(false);
    for i in 0..count {
        builder = builder.route(format!("route-{i}"), format!("/level/entry-{i}"), ok);
    }
    builder.build().expect("valid routes")
}

/// Static-child lookup below and above the list-to-map promotion cutoff.
fn bench_branch_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("branch_width");
    for count in [2usize, 4, 8, 16, 24] {
        let mux = sibling_mux(count);
        let target = format!("/level/entry-{}", count - 1);
        group.bench_function(format!("{count}_siblings"), |b| {
            b.iter(|| {
                let matched = mux.match_path(black_box(&target));
                debug_assert!(matched.is_some());
                matched
            })
        });
    }
    group.finish();
}

fn bench_match_shapes(c: &mut Criterion) {
    let mux = Mux::builder()
        .route("root", "/", ok)
        .route("list", "/zoo/animals", ok)
        .route("get", "/zoo/animals/[id]", ok)
        .route("toy", "/zoo/animals/[id]/toys/[toy]", ok)
        .route("deep", "/zoo/[category]/animals/[id]/habitats/[habitat]/sections/[section]", ok)
        .route("files", "/static/[...path]", ok)
        .build()
        .expect("valid routes");

    let mut group = c.benchmark_group("match_shapes");
    for (name, target) in [
        ("static", "/zoo/animals"),
        ("one_param", "/zoo/animals/1138"),
        ("two_params", "/zoo/animals/1138/toys/7"),
        ("deep_params", "/zoo/reptiles/animals/1138/habitats/3/sections/9"),
        ("catch_all", "/static/css/site/main.css"),
        ("miss", "/zoo/plants/ferns"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| mux.match_path(black_box(target)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_branch_width, bench_match_shapes);
criterion_main!(benches);
