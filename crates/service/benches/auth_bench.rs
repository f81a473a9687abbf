use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use models::roles::Role;
use service::auth::domain::{LoginInput, SignupInput};
use service::auth::repository::mock::MockUserStore;
use service::auth::{AuthConfig, AuthService};

fn bench_login(c: &mut Criterion) {
    let store = Arc::new(MockUserStore::default());
    let cfg = AuthConfig {
        jwt_secret: "bench-secret".into(),
        access_token_ttl_secs: 3600,
        algorithm: "HS256".into(),
        issuer: "booking-api".into(),
    };
    let svc = AuthService::new(store, cfg).unwrap();

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.signup(SignupInput {
        email: "bench@example.com".into(),
        full_name: "Bench".into(),
        password: "Benchmark1".into(),
        phone: None,
        roles: vec![Role::Client],
        business_name: None,
        website: None,
        address: None,
    }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt
                .block_on(svc.login(LoginInput {
                    email: "bench@example.com".into(),
                    password: "Benchmark1".into(),
                }))
                .unwrap();
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
