//! Ant Colony Optimization driver: learns good scan-direction, rotation,
//! and priority-axis choices across iterations via pheromone reinforcement.

use crate::display::DisplaySink;
use crate::error::{CutLayError, Result};
use crate::fitness::{self, Quality};
use crate::geometry;
use crate::model::{Layout, Part, ScanConfig, Sheet};
use crate::packer;
use crate::result::OptimizationResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const EVAPORATION_FACTOR: f64 = 0.9;
const ROTATION_ROLL_PROBABILITY: f64 = 0.1;
const ORDER_DEPOSIT_FACTOR: f64 = 0.01;
const ROTATION_ANGLES: [u32; 10] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90];

/// Tunables for [`aco_optimize`].
#[derive(Debug, Clone, Copy)]
pub struct AcoConfig {
    pub num_ants: usize,
    pub num_iterations: usize,
    pub margin: u32,
    pub seed: u64,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 10,
            num_iterations: 20,
            margin: 1,
            seed: 0x4143_4f31,
        }
    }
}

impl AcoConfig {
    fn validate(&self) -> Result<()> {
        if self.num_ants < 1 {
            return Err(CutLayError::Underpopulated {
                param: "num_ants",
                value: self.num_ants as i64,
            });
        }
        if self.num_iterations < 1 {
            return Err(CutLayError::Underpopulated {
                param: "num_iterations",
                value: self.num_iterations as i64,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Horizontal,
    Vertical,
}

struct PheromoneState {
    scan: [f64; 4],
    order: Vec<f64>,
    rotation: HashMap<u32, f64>,
    direction: [f64; 2],
}

impl PheromoneState {
    fn new(num_parts: usize) -> Self {
        let rotation = ROTATION_ANGLES.iter().map(|&a| (a, 1.0)).collect();
        Self {
            scan: [1.0; 4],
            order: vec![1.0; num_parts],
            rotation,
            direction: [1.0; 2],
        }
    }

    fn evaporate(&mut self) {
        self.scan.iter_mut().for_each(|w| *w *= EVAPORATION_FACTOR);
        self.direction
            .iter_mut()
            .for_each(|w| *w *= EVAPORATION_FACTOR);
        self.rotation
            .values_mut()
            .for_each(|w| *w *= EVAPORATION_FACTOR);
        self.order.iter_mut().for_each(|w| *w *= EVAPORATION_FACTOR);
    }

    fn deposit(&mut self, solution: &AntSolution) {
        let q = solution.quality.score();
        self.scan[solution.scan_idx] += q;
        let dir_idx = match solution.direction {
            Direction::Horizontal => 0,
            Direction::Vertical => 1,
        };
        self.direction[dir_idx] += q;
        for &angle in solution.rotation_choices.values() {
            *self.rotation.entry(angle).or_insert(1.0) += q;
        }
        for w in self.order.iter_mut() {
            *w += ORDER_DEPOSIT_FACTOR * q;
        }
    }
}

struct AntSolution {
    layout: Layout,
    scan_idx: usize,
    direction: Direction,
    rotation_choices: HashMap<usize, u32>,
    quality: Quality,
}

/// Picks an index into `weights` with probability proportional to its
/// weight. Falls back to uniform sampling when the weights sum to zero or
/// less (possible after repeated evaporation).
fn weighted_choice(rng: &mut StdRng, weights: &[f64]) -> usize {
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        warn!("pheromone weights collapsed to <= 0, falling back to uniform sampling");
        return rng.gen_range(0..weights.len());
    }
    let mut roll = rng.gen::<f64>() * sum;
    for (i, &w) in weights.iter().enumerate() {
        if roll < w {
            return i;
        }
        roll -= w;
    }
    weights.len() - 1
}

fn scan_options(margin: u32) -> [ScanConfig; 4] {
    ScanConfig::all_directions(margin)
}

fn run_ant(sheet: Sheet, parts: &[Part], pheromone: &PheromoneState, margin: u32, rng: &mut StdRng) -> AntSolution {
    let options = scan_options(margin);
    let scan_idx = weighted_choice(rng, &pheromone.scan);
    let mut scan_cfg = options[scan_idx];

    let mut ordered: Vec<Part> = parts.to_vec();
    ordered.sort_by(|a, b| {
        geometry::area(b)
            .partial_cmp(&geometry::area(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut rotation_choices = HashMap::new();
    if rng.gen::<f64>() < ROTATION_ROLL_PROBABILITY {
        let rect_weights = [
            *pheromone.rotation.get(&0).unwrap_or(&1.0),
            *pheromone.rotation.get(&90).unwrap_or(&1.0),
        ];
        let diamond_weights: Vec<f64> = ROTATION_ANGLES
            .iter()
            .map(|a| *pheromone.rotation.get(a).unwrap_or(&1.0))
            .collect();

        for (i, part) in ordered.iter_mut().enumerate() {
            match part {
                Part::Rectangular { .. } => {
                    let idx = weighted_choice(rng, &rect_weights);
                    let angle = if idx == 0 { 0 } else { 90 };
                    *part = part.with_rotation(angle);
                    rotation_choices.insert(i, angle);
                }
                Part::Diamond { .. } => {
                    let idx = weighted_choice(rng, &diamond_weights);
                    let angle = ROTATION_ANGLES[idx];
                    *part = part.with_rotation(angle);
                    rotation_choices.insert(i, angle);
                }
                Part::Circular { .. } => {}
            }
        }
    }

    let direction = if weighted_choice(rng, &pheromone.direction) == 0 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    scan_cfg.horizontal_priority = direction == Direction::Horizontal;

    let layout = packer::pack(sheet, &ordered, &scan_cfg);
    let quality = fitness::evaluate(sheet, &layout, parts.len());

    AntSolution {
        layout,
        scan_idx,
        direction,
        rotation_choices,
        quality,
    }
}

fn run_ants(
    sheet: Sheet,
    parts: &[Part],
    pheromone: &PheromoneState,
    margin: u32,
    seeds: &[u64],
) -> Vec<AntSolution> {
    #[cfg(feature = "parallel")]
    {
        return seeds
            .par_iter()
            .map(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                run_ant(sheet, parts, pheromone, margin, &mut rng)
            })
            .collect();
    }
    #[cfg(not(feature = "parallel"))]
    {
        seeds
            .iter()
            .map(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                run_ant(sheet, parts, pheromone, margin, &mut rng)
            })
            .collect()
    }
}

/// Runs ant colony optimization and returns the best layout observed,
/// never worse than any intermediate result (invariant 7 of the testable
/// properties).
pub fn aco_optimize(sheet: Sheet, parts: &[Part], cfg: &AcoConfig) -> Result<OptimizationResult> {
    aco_optimize_with(sheet, parts, cfg, None, None)
}

/// Full-signature variant accepting an optional display sink (notified on
/// every improvement of the best-so-far layout) and an optional
/// once-per-iteration-and-per-ant cancellation check.
#[instrument(level = "debug", skip(parts, sink, cancelled), fields(parts = parts.len(), ants = cfg.num_ants, iterations = cfg.num_iterations))]
pub fn aco_optimize_with(
    sheet: Sheet,
    parts: &[Part],
    cfg: &AcoConfig,
    sink: Option<&dyn DisplaySink>,
    cancelled: Option<&dyn Fn() -> bool>,
) -> Result<OptimizationResult> {
    if parts.is_empty() {
        return Err(CutLayError::Empty);
    }
    cfg.validate()?;

    let started = Instant::now();
    let mut pheromone = PheromoneState::new(parts.len());
    let mut best: Option<(Layout, Quality)> = None;
    let mut rounds_run = 0;
    let mut root_rng = StdRng::seed_from_u64(cfg.seed);

    for iteration in 0..cfg.num_iterations {
        if cancelled.map_or(false, |f| f()) {
            break;
        }
        rounds_run = iteration + 1;

        let seeds: Vec<u64> = (0..cfg.num_ants).map(|_| root_rng.gen()).collect();
        let solutions = run_ants(sheet, parts, &pheromone, cfg.margin, &seeds);

        for solution in &solutions {
            pheromone.deposit(solution);
        }
        pheromone.evaporate();

        for solution in solutions {
            let improved = best
                .as_ref()
                .map_or(true, |(_, q)| solution.quality.score() > q.score());
            if improved {
                best = Some((solution.layout.clone(), solution.quality));
                if let Some(sink) = sink {
                    sink.show(&solution.layout, "aco best");
                }
            }
        }

        debug!(
            iteration,
            best_quality = best.as_ref().map(|(_, q)| q.score()),
            "aco iteration complete"
        );
    }

    let (layout, quality) = best.ok_or(CutLayError::Empty)?;
    Ok(OptimizationResult {
        layout,
        quality,
        elapsed: started.elapsed(),
        rounds_run,
    })
}
