use cutlay_core::error::CutLayError;
use cutlay_core::input::{parse_parts, validate_sheet};
use cutlay_core::model::{Part, Sheet};

#[test]
fn parses_all_three_tagged_shapes() {
    let json = r#"[
        {"tipo": "retangular", "largura": 10, "altura": 5, "rotacao": 0, "x": 0, "y": 0},
        {"tipo": "circular", "r": 4, "x": 0, "y": 0},
        {"tipo": "diamante", "largura": 8, "altura": 8, "rotacao": 30, "x": 0, "y": 0}
    ]"#;
    let parts = parse_parts(json).expect("well-formed input should parse");
    assert_eq!(parts.len(), 3);
    assert!(matches!(parts[0], Part::Rectangular { .. }));
    assert!(matches!(parts[1], Part::Circular { .. }));
    assert!(matches!(parts[2], Part::Diamond { .. }));
}

#[test]
fn rejects_zero_dimension_rectangle() {
    let json = r#"[{"tipo": "retangular", "largura": 0, "altura": 5, "x": 0, "y": 0}]"#;
    let err = parse_parts(json).unwrap_err();
    assert!(matches!(err, CutLayError::InvalidPart { index: 0, .. }));
}

#[test]
fn rejects_invalid_diamond_rotation_step() {
    let json = r#"[{"tipo": "diamante", "largura": 8, "altura": 8, "rotacao": 15, "x": 0, "y": 0}]"#;
    let err = parse_parts(json).unwrap_err();
    assert!(matches!(err, CutLayError::InvalidPart { .. }));
}

#[test]
fn rejects_unknown_tipo() {
    let json = r#"[{"tipo": "triangular", "x": 0, "y": 0}]"#;
    assert!(parse_parts(json).is_err());
}

#[test]
fn validates_sheet_dimensions() {
    assert!(validate_sheet(Sheet::new(10, 10)).is_ok());
    let err = validate_sheet(Sheet::new(0, 10)).unwrap_err();
    assert!(matches!(err, CutLayError::InvalidSheet { .. }));
}
