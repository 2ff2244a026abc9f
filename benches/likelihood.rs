use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use ndarray::array;
use rust_scoreline::scoreline::core::{
    EffectParameters, Game, InnerOptions, MatchDataset, laplace_gradient, laplace_nll,
    neg_log_likelihood, nll_gradient,
};

/// 20-team double round robin with deterministic scores.
fn season() -> MatchDataset {
    let n_teams = 20;
    let mut games = Vec::new();
    for h in 0..n_teams {
        for a in 0..n_teams {
            if h != a {
                let (home_goals, away_goals) = ((5 * h + 3 * a) % 5, (h + 2 * a) % 4);
                games.push(Game::new(h, a, home_goals as u32, away_goals as u32));
            }
        }
    }
    MatchDataset::new(games, n_teams).expect("valid season")
}

fn season_params(data: &MatchDataset) -> EffectParameters {
    let mut params = EffectParameters::zeros(&data.shape());
    params.intercept = 0.3;
    for t in 0..data.n_teams() {
        let x = t as f64 / data.n_teams() as f64 - 0.5;
        params.attack[t] = 0.4 * x;
        params.defense[t] = -0.3 * x;
        params.home[t] = 0.1 * x;
    }
    params.log_sigma_attack = -1.0;
    params.log_sigma_defense = -1.2;
    params.log_sigma_home = -2.0;
    params
}

fn bench_joint_likelihood(c: &mut Criterion) {
    let data = season();
    let params = season_params(&data);
    c.bench_function("neg_log_likelihood_380_games", |b| {
        b.iter(|| black_box(neg_log_likelihood(black_box(&data), black_box(&params))))
    });
    c.bench_function("nll_gradient_380_games", |b| {
        b.iter(|| black_box(nll_gradient(black_box(&data), black_box(&params))))
    });
}

fn bench_laplace(c: &mut Criterion) {
    let data = season();
    let phi = array![0.3, -1.0, -1.2, -2.0];
    let inner = InnerOptions::default();
    c.bench_function("laplace_nll_380_games", |b| {
        b.iter(|| black_box(laplace_nll(black_box(&data), phi.view(), &inner).unwrap()))
    });
    c.bench_function("laplace_gradient_380_games", |b| {
        b.iter(|| black_box(laplace_gradient(black_box(&data), phi.view(), &inner).unwrap()))
    });
}

criterion_group!(benches, bench_joint_likelihood, bench_laplace);
criterion_main!(benches);
