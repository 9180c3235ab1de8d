use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use p256::{pkcs8::EncodePrivateKey, SecretKey};
use rand_core::OsRng;
use sgx_ecdh::{
    derive_shared_secret, derive_static_shared_secret, load_private_key_pem, EphemeralKeyPair,
    PeerPublicKey,
};

type Benchmarker = Criterion;

fn peer_wire() -> sgx_ecdh::Ec256PublicKey {
    PeerPublicKey::from(SecretKey::random(&mut OsRng).public_key()).to_wire()
}

fn bench(c: &mut Benchmarker) {
    let wire = peer_wire();
    let peer = PeerPublicKey::try_from(&wire).unwrap();

    let mut group = c.benchmark_group("peer");
    group.bench_function(BenchmarkId::new("from_coordinates", 1), |b| {
        b.iter(|| PeerPublicKey::from_coordinates(black_box(&wire.gx), black_box(&wire.gy)));
    });
    group.finish();

    let mut group = c.benchmark_group("derive");
    group.bench_function(BenchmarkId::new("ephemeral", 1), |b| {
        b.iter(|| derive_shared_secret(black_box(&peer)).unwrap());
    });
    group.bench_function(BenchmarkId::new("ephemeral_with_public", 1), |b| {
        b.iter(|| {
            let ours = EphemeralKeyPair::generate(&mut OsRng);
            let g_b = ours.public_key();
            (g_b, ours.agree(black_box(&peer)).unwrap())
        });
    });

    let pem = SecretKey::random(&mut OsRng)
        .to_pkcs8_pem(p256::pkcs8::LineEnding::LF)
        .unwrap();
    let identity = load_private_key_pem(&pem).unwrap();
    group.bench_function(BenchmarkId::new("static", 1), |b| {
        b.iter(|| derive_static_shared_secret(black_box(&identity), black_box(&peer)).unwrap());
    });
    group.finish();

    let mut group = c.benchmark_group("load");
    group.bench_function(BenchmarkId::new("pkcs8_pem", 1), |b| {
        b.iter(|| load_private_key_pem(black_box(&pem)).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
