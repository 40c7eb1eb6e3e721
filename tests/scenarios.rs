use cutlay_core::model::{Part, ScanConfig, Sheet};
use cutlay_core::{evaluate, ga_optimize, pack, GaConfig};
use std::f64::consts::PI;

#[test]
fn s1_trivial_fit() {
    let sheet = Sheet::new(10, 10);
    let parts = vec![Part::Rectangular {
        largura: 10,
        altura: 10,
        rotacao: 0,
    }];
    let layout = pack(sheet, &parts, &ScanConfig::default());
    assert_eq!(layout.len(), 1);
    assert_eq!((layout[0].x, layout[0].y), (0, 0));

    let quality = evaluate(sheet, &layout, parts.len());
    assert_eq!(quality.utilization, 1.0);
    assert_eq!(quality.score(), 1.0);
}

#[test]
fn s2_two_tiles_share_the_sheet() {
    let sheet = Sheet::new(10, 10);
    let parts = vec![
        Part::Rectangular {
            largura: 5,
            altura: 10,
            rotacao: 0,
        },
        Part::Rectangular {
            largura: 5,
            altura: 10,
            rotacao: 0,
        },
    ];
    let cfg = ScanConfig::new(true, true, true, 0);
    let layout = pack(sheet, &parts, &cfg);
    assert_eq!(layout.len(), 2);
    assert_eq!((layout[0].x, layout[0].y), (0, 0));
    assert_eq!((layout[1].x, layout[1].y), (5, 0));

    let quality = evaluate(sheet, &layout, parts.len());
    assert_eq!(quality.score(), 1.0);
}

#[test]
fn s3_margin_forces_a_skip() {
    let sheet = Sheet::new(10, 10);
    let parts = vec![
        Part::Rectangular {
            largura: 5,
            altura: 10,
            rotacao: 0,
        },
        Part::Rectangular {
            largura: 5,
            altura: 10,
            rotacao: 0,
        },
    ];
    let cfg = ScanConfig::new(true, true, true, 1);
    let layout = pack(sheet, &parts, &cfg);
    assert_eq!(layout.len(), 1);

    let quality = evaluate(sheet, &layout, parts.len());
    assert!((quality.score() - (-0.5)).abs() < 1e-9);
}

#[test]
fn s4_circle_pair_fits_side_by_side() {
    let sheet = Sheet::new(40, 20);
    let parts = vec![Part::Circular { r: 10 }, Part::Circular { r: 10 }];
    let layout = pack(sheet, &parts, &ScanConfig::default());
    assert_eq!(layout.len(), 2);

    let quality = evaluate(sheet, &layout, parts.len());
    assert_eq!(quality.overlap_penalty, 0.0);
    let expected_utilization = (2.0 * PI * 100.0) / 800.0;
    assert!((quality.utilization - expected_utilization).abs() < 1e-9);
}

#[test]
fn s5_diamond_rotation_fits_at_origin() {
    let sheet = Sheet::new(30, 30);
    let parts = vec![Part::Diamond {
        largura: 20,
        altura: 20,
        rotacao: 0,
    }];
    let layout = pack(sheet, &parts, &ScanConfig::default());
    assert_eq!(layout.len(), 1);
    assert_eq!((layout[0].x, layout[0].y), (0, 0));

    let quality = evaluate(sheet, &layout, parts.len());
    let expected_utilization = 200.0 / 900.0;
    assert!((quality.utilization - expected_utilization).abs() < 1e-9);
}

/// The fixed seed table from the external interfaces section, duplicated
/// here (not imported) so this test independently verifies the GA's
/// initial population rather than trusting its own source.
const SEED_CONFIGS: [(bool, bool, bool, bool); 7] = [
    (true, true, true, true),
    (true, false, false, true),
    (true, true, true, false),
    (true, false, true, true),
    (false, false, false, true),
    (false, true, true, true),
    (false, false, true, true),
];

#[test]
fn s6_ga_seeding_matches_fixed_configuration_table() {
    let sheet = Sheet::new(60, 60);
    let parts = vec![
        Part::Rectangular {
            largura: 10,
            altura: 8,
            rotacao: 0,
        },
        Part::Circular { r: 6 },
        Part::Diamond {
            largura: 14,
            altura: 10,
            rotacao: 0,
        },
        Part::Rectangular {
            largura: 20,
            altura: 5,
            rotacao: 0,
        },
        Part::Rectangular {
            largura: 6,
            altura: 6,
            rotacao: 0,
        },
    ];

    let mut best_manual = f64::NEG_INFINITY;
    for &(desc, lr, tb, horiz) in SEED_CONFIGS.iter() {
        let mut ordered = parts.clone();
        ordered.sort_by(|a, b| {
            let area_a = cutlay_core::geometry::area(a);
            let area_b = cutlay_core::geometry::area(b);
            if desc {
                area_b.partial_cmp(&area_a).unwrap()
            } else {
                area_a.partial_cmp(&area_b).unwrap()
            }
        });
        let cfg = ScanConfig::new(lr, tb, horiz, 1);
        let layout = pack(sheet, &ordered, &cfg);
        let quality = evaluate(sheet, &layout, parts.len());
        best_manual = best_manual.max(quality.score());
    }

    // With population_size == number of fixed seeds and a single generation,
    // the GA's first (and only) evaluated population is exactly the fixed
    // seed table, so its reported best must match the manually computed one.
    let ga_cfg = GaConfig {
        population_size: 7,
        num_generations: 1,
        seed: 1,
    };
    let result = ga_optimize(sheet, &parts, &ga_cfg).unwrap();

    assert!((result.quality.score() - best_manual).abs() < 1e-9);
}
