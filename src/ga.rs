//! Genetic Algorithm driver: evolves piece orderings and scan flags under
//! the flexible packer, seeded by a fixed table of deterministic starting
//! configurations plus random individuals.

use crate::display::DisplaySink;
use crate::error::{CutLayError, Result};
use crate::fitness::{self, Quality};
use crate::geometry;
use crate::model::{Layout, Part, ScanConfig, Sheet};
use crate::packer;
use crate::result::OptimizationResult;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const GA_MARGIN: u32 = 1;
const ELITISM_FRACTION: f64 = 0.01;
const CROSSOVER_FRACTION: f64 = 0.30;
const MUTATION_FRACTION: f64 = 0.05;
const TOURNAMENT_K: usize = 3;
const ROTATION_ANGLES: [u32; 10] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90];

/// `(order_desc, left_to_right, top_to_bottom, horizontal_priority)` for
/// each of the seven fixed starting individuals, spanning diverse scan
/// regimes before the population is rounded out with random individuals.
const SEED_CONFIGS: [(bool, bool, bool, bool); 7] = [
    (true, true, true, true),
    (true, false, false, true),
    (true, true, true, false),
    (true, false, true, true),
    (false, false, false, true),
    (false, true, true, true),
    (false, false, true, true),
];

/// Tunables for [`ga_optimize`].
#[derive(Debug, Clone, Copy)]
pub struct GaConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            num_generations: 50,
            seed: 0x6741_4c47,
        }
    }
}

impl GaConfig {
    fn validate(&self) -> Result<()> {
        if self.population_size < 1 {
            return Err(CutLayError::Underpopulated {
                param: "population_size",
                value: self.population_size as i64,
            });
        }
        if self.num_generations < 1 {
            return Err(CutLayError::Underpopulated {
                param: "num_generations",
                value: self.num_generations as i64,
            });
        }
        Ok(())
    }
}

#[derive(Clone)]
struct Individual {
    pieces: Vec<Part>,
    scan: ScanConfig,
}

struct Evaluated {
    individual: Individual,
    layout: Layout,
    quality: Quality,
}

fn build_initial_population(parts: &[Part], population_size: usize, rng: &mut StdRng) -> Vec<Individual> {
    let mut population = Vec::with_capacity(population_size);
    let seed_count = SEED_CONFIGS.len().min(population_size);

    for &(desc, lr, tb, horiz) in SEED_CONFIGS.iter().take(seed_count) {
        let mut pieces = parts.to_vec();
        pieces.sort_by(|a, b| {
            let (lhs, rhs) = if desc { (b, a) } else { (a, b) };
            geometry::area(lhs)
                .partial_cmp(&geometry::area(rhs))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        population.push(Individual {
            pieces,
            scan: ScanConfig::new(lr, tb, horiz, GA_MARGIN),
        });
    }

    for _ in seed_count..population_size {
        let mut pieces = parts.to_vec();
        pieces.shuffle(rng);
        let scan = ScanConfig::new(rng.gen_bool(0.5), rng.gen_bool(0.5), rng.gen_bool(0.5), GA_MARGIN);
        population.push(Individual { pieces, scan });
    }

    population
}

fn evaluate_population(sheet: Sheet, expected_count: usize, population: &[Individual]) -> Vec<Evaluated> {
    let eval_one = |individual: &Individual| {
        let layout = packer::pack(sheet, &individual.pieces, &individual.scan);
        let quality = fitness::evaluate(sheet, &layout, expected_count);
        Evaluated {
            individual: individual.clone(),
            layout,
            quality,
        }
    };

    #[cfg(feature = "parallel")]
    {
        return population.par_iter().map(eval_one).collect();
    }
    #[cfg(not(feature = "parallel"))]
    {
        population.iter().map(eval_one).collect()
    }
}

fn tournament_select(evaluated: &[Evaluated], rng: &mut StdRng) -> usize {
    let m = evaluated.len();
    let mut best_idx = rng.gen_range(0..m);
    for _ in 1..TOURNAMENT_K {
        let candidate = rng.gen_range(0..m);
        if evaluated[candidate].quality.score() > evaluated[best_idx].quality.score() {
            best_idx = candidate;
        }
    }
    best_idx
}

/// One-point splice on the piece sequence. Does not preserve a permutation
/// (a child may contain a duplicated or dropped part); the packer treats
/// a duplicate as just another candidate to place or skip, so this is
/// accepted as-is rather than repaired.
fn crossover(p1: &Individual, p2: &Individual) -> (Individual, Individual) {
    let half = p1.pieces.len() / 2;
    let half2 = p2.pieces.len() / 2;

    let mut c1 = p1.pieces[..half].to_vec();
    c1.extend_from_slice(&p2.pieces[half2..]);
    let mut c2 = p2.pieces[..half2].to_vec();
    c2.extend_from_slice(&p1.pieces[half..]);

    (
        Individual {
            pieces: c1,
            scan: p1.scan,
        },
        Individual {
            pieces: c2,
            scan: p2.scan,
        },
    )
}

fn mutate(individual: &mut Individual, rng: &mut StdRng) {
    if individual.pieces.is_empty() {
        return;
    }
    let i = rng.gen_range(0..individual.pieces.len());
    let angle = match &individual.pieces[i] {
        Part::Diamond { .. } => Some(ROTATION_ANGLES[rng.gen_range(0..ROTATION_ANGLES.len())]),
        Part::Rectangular { .. } => Some(if rng.gen_bool(0.5) { 0 } else { 90 }),
        Part::Circular { .. } => None,
    };
    if let Some(angle) = angle {
        individual.pieces[i] = individual.pieces[i].with_rotation(angle);
    }
}

/// Builds the next population from an evaluated one: elitism, tournament
/// crossover, then mutation. The result's size is allowed to drift away
/// from the input size (see the design notes on population drift) — this
/// is the source of the next generation's evaluation count, not a bug to
/// paper over with re-seeding.
fn next_generation(evaluated: &[Evaluated], rng: &mut StdRng) -> Vec<Individual> {
    let m = evaluated.len();
    let mut aux = Vec::new();

    let elite_count = (ELITISM_FRACTION * m as f64).floor() as usize;
    if elite_count > 0 {
        let mut order: Vec<usize> = (0..m).collect();
        order.sort_by(|&a, &b| {
            evaluated[b]
                .quality
                .score()
                .partial_cmp(&evaluated[a].quality.score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let positive: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&i| evaluated[i].quality.score() > 0.0)
            .collect();
        let source = if positive.is_empty() { &order } else { &positive };
        for &i in source.iter().take(elite_count) {
            aux.push(evaluated[i].individual.clone());
        }
    }

    let pairings = (CROSSOVER_FRACTION * m as f64).floor() as usize;
    for _ in 0..pairings {
        let p1 = tournament_select(evaluated, rng);
        let mut p2 = tournament_select(evaluated, rng);
        while p2 == p1 && m > 1 {
            p2 = tournament_select(evaluated, rng);
        }
        let (c1, c2) = crossover(&evaluated[p1].individual, &evaluated[p2].individual);
        aux.push(c1);
        aux.push(c2);
    }

    let mutate_count = (MUTATION_FRACTION * m as f64).floor() as usize;
    for _ in 0..mutate_count {
        if aux.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..aux.len());
        mutate(&mut aux[idx], rng);
    }

    aux
}

/// Runs the genetic algorithm and returns the best layout observed across
/// every generation's evaluation pass.
pub fn ga_optimize(sheet: Sheet, parts: &[Part], cfg: &GaConfig) -> Result<OptimizationResult> {
    ga_optimize_with(sheet, parts, cfg, None, None)
}

/// Full-signature variant accepting an optional display sink (notified on
/// every improvement of the best-so-far layout) and an optional
/// once-per-generation cancellation check.
#[instrument(level = "debug", skip(parts, sink, cancelled), fields(parts = parts.len(), population = cfg.population_size, generations = cfg.num_generations))]
pub fn ga_optimize_with(
    sheet: Sheet,
    parts: &[Part],
    cfg: &GaConfig,
    sink: Option<&dyn DisplaySink>,
    cancelled: Option<&dyn Fn() -> bool>,
) -> Result<OptimizationResult> {
    if parts.is_empty() {
        return Err(CutLayError::Empty);
    }
    cfg.validate()?;

    let started = Instant::now();
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut population = build_initial_population(parts, cfg.population_size, &mut rng);
    let mut best: Option<(Layout, Quality)> = None;
    let mut rounds_run = 0;

    for generation in 0..cfg.num_generations {
        if cancelled.map_or(false, |f| f()) {
            break;
        }
        rounds_run = generation + 1;

        let evaluated = evaluate_population(sheet, parts.len(), &population);

        for e in &evaluated {
            let improved = best
                .as_ref()
                .map_or(true, |(_, q)| e.quality.score() > q.score());
            if improved {
                best = Some((e.layout.clone(), e.quality));
                if let Some(sink) = sink {
                    sink.show(&e.layout, "ga best");
                }
            }
        }

        debug!(
            generation,
            population_size = evaluated.len(),
            best_quality = best.as_ref().map(|(_, q)| q.score()),
            "ga generation complete"
        );

        if generation + 1 == cfg.num_generations {
            break;
        }

        population = next_generation(&evaluated, &mut rng);
        if population.is_empty() {
            warn!(generation, "ga population collapsed to zero, stopping early");
            break;
        }
    }

    let (layout, quality) = best.ok_or(CutLayError::Empty)?;
    Ok(OptimizationResult {
        layout,
        quality,
        elapsed: started.elapsed(),
        rounds_run,
    })
}
