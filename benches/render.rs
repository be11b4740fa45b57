// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;

use criterion::Criterion;
use zfractals::colorize::colorize_buffer;
use zfractals::sampler::{render_single, render_threaded};
use zfractals::{CompiledFunction, FractalConfig, Vary};

fn config() -> FractalConfig {
    FractalConfig {
        amin: -2.5,
        amax: 1.5,
        bmin: -1.5,
        bmax: 1.5,
        width: 160,
        height: 120,
        max_iterations: 100,
        escape_radius: 2.0,
        vary: Vary::C,
    }
}

fn mandelbrot_single(c: &mut Criterion) {
    let func = CompiledFunction::compile("z^2 + c").unwrap();
    c.bench_function("mandelbrot 160x120 single", move |b| {
        b.iter(|| render_single(&config(), &func).unwrap())
    });
}

fn mandelbrot_threaded(c: &mut Criterion) {
    let func = CompiledFunction::compile("z^2 + c").unwrap();
    let threads = num_cpus::get();
    c.bench_function("mandelbrot 160x120 threaded", move |b| {
        b.iter(|| render_threaded(&config(), &func, threads).unwrap())
    });
}

fn colorize(c: &mut Criterion) {
    let data: Vec<f64> = (0..160 * 120).map(|i| f64::from(i % 101) / 100.0).collect();
    c.bench_function("colorize 160x120", move |b| {
        b.iter(|| colorize_buffer(data.clone()))
    });
}

criterion_group!(benches, mandelbrot_single, mandelbrot_threaded, colorize);
criterion_main!(benches);
