// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Samples the escape-time function over every pixel of the grid.
//!
//! Each pixel depends only on its own coordinates, so the grid can be
//! computed in any order.  The threaded renderer hands out whole rows
//! from a shared queue; each worker writes only into the row it took,
//! and the result is identical to the single-threaded one.

use crate::complex::{Complex, ZERO};
use crate::config::{FractalConfig, Vary};
use crate::errors::FractalError;
use crate::escape::{check, IterationFn};
use crate::planes::{Pixel, PlaneMapper};
use crossbeam::thread::ScopedJoinHandle;
use itertools::iproduct;
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

type RowQueue<'a> = Mutex<std::iter::Enumerate<std::slice::ChunksMut<'a, f64>>>;

/// The (z0, c) pair for a point on the plane.
fn starting_values(vary: Vary, point: Complex) -> (Complex, Complex) {
    match vary {
        Vary::Z => (point, ZERO),
        Vary::C => (ZERO, point),
    }
}

fn sample<F>(
    config: &FractalConfig,
    plane: &PlaneMapper,
    func: &F,
    pixel: &Pixel,
) -> Result<f64, FractalError>
where
    F: IterationFn + ?Sized,
{
    let (z0, c) = starting_values(config.vary, plane.pixel_to_point(pixel));
    check(z0, c, func, config.max_iterations, config.escape_radius)
}

fn render_row<F>(
    config: &FractalConfig,
    plane: &PlaneMapper,
    func: &F,
    top: usize,
    row: &mut [f64],
) -> Result<(), FractalError>
where
    F: IterationFn + ?Sized,
{
    for (left, value) in row.iter_mut().enumerate() {
        *value = sample(config, plane, func, &Pixel(left, top))?;
    }
    Ok(())
}

/// Renders the grid on the calling thread, one pixel after another.
pub fn render_single<F>(config: &FractalConfig, func: &F) -> Result<Vec<f64>, FractalError>
where
    F: IterationFn + ?Sized,
{
    let plane = config.plane();
    let mut buffer = vec![0.0_f64; plane.len()];
    for (top, left) in iproduct!(0..plane.height(), 0..plane.width()) {
        let pixel = Pixel(left, top);
        buffer[plane.offset(&pixel)] = sample(config, &plane, func, &pixel)?;
    }
    Ok(buffer)
}

/// Renders the grid with `threads` workers.  The first failure from
/// the iteration function stops the remaining workers and is returned.
pub fn render_threaded<F>(
    config: &FractalConfig,
    func: &F,
    threads: usize,
) -> Result<Vec<f64>, FractalError>
where
    F: IterationFn + Sync + ?Sized,
{
    let plane = config.plane();
    let mut buffer = vec![0.0_f64; plane.len()];
    if plane.is_empty() {
        return Ok(buffer);
    }
    let threads = threads.min(plane.height()).max(1);

    {
        let rows: RowQueue = Mutex::new(buffer.chunks_mut(plane.width()).enumerate());
        let failed = AtomicBool::new(false);
        let (rows, failed, plane) = (&rows, &failed, &plane);

        let results = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Result<(), FractalError>>> = (0..threads)
                .map(|worker| {
                    spawner.spawn(move |_| loop {
                        if failed.load(Ordering::Relaxed) {
                            return Ok(());
                        }
                        let row = match rows.lock() {
                            Ok(mut rows) => rows.next(),
                            Err(_) => return Err(FractalError::WorkerPanicked),
                        };
                        match row {
                            Some((top, row)) => {
                                trace!("worker {} takes row {}", worker, top);
                                if let Err(e) = render_row(config, plane, func, top, row) {
                                    failed.store(true, Ordering::Relaxed);
                                    return Err(e);
                                }
                            }
                            None => {
                                return Ok(());
                            }
                        }
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        })
        .map_err(|_| FractalError::WorkerPanicked)?;

        for result in results {
            result.map_err(|_| FractalError::WorkerPanicked)??;
        }
    }

    Ok(buffer)
}

/// Renders the grid, using worker threads when `threads` is more than
/// one.  Every value in the result is in [0, 1], stored row-major at
/// `x + y * width`.
pub fn render<F>(config: &FractalConfig, func: &F, threads: usize) -> Result<Vec<f64>, FractalError>
where
    F: IterationFn + Sync + ?Sized,
{
    debug!(
        "rendering {}x{} ({:?} varies) on {} thread(s)",
        config.width, config.height, config.vary, threads
    );
    if threads > 1 {
        render_threaded(config, func, threads)
    } else {
        render_single(config, func)
    }
}
