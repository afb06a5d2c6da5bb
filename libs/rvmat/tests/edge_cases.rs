use rvmat::ast::{Node, Value};
use rvmat::{parse, parse_with, Error, LexErrorKind, ParseErrorKind, ParseOptions, Position};

fn strict_numbers() -> ParseOptions {
    ParseOptions {
        relaxed_numbers: false,
        ..ParseOptions::default()
    }
}

#[test]
fn zero_byte_anywhere_in_window_is_binary() {
    let text = b"ambient[]={1,1,1,1};\n".repeat(200);
    assert!(text.len() > 4096);
    assert!(parse(&text).is_ok());

    for index in [0, 2000, 4000, 4095] {
        let mut data = text.clone();
        data[index] = 0;
        assert!(matches!(parse(&data), Err(Error::BinaryInput)), "zero byte at {}", index);
    }
}

#[test]
fn zero_byte_past_window_is_not_binary() {
    let mut data = vec![b' '; 4096];
    data.extend_from_slice(b"\0");
    let err = parse(&data).expect_err("zero byte is not a token");
    assert!(matches!(err, Error::Lex(e) if e.kind == LexErrorKind::UnexpectedCharacter('\0')));
}

#[test]
fn relaxed_numbers_coerce_garbage() {
    let src = b"diffuse[] = {0.75, 1.5, \"1.25.1\", 0.0};";
    let material = parse(src).expect("relaxed parse succeeds");
    assert_eq!(material.diffuse, vec![0.75, 1.5, 0.0, 0.0]);

    match parse_with(src, &strict_numbers()) {
        Err(Error::Parse(e)) => assert!(matches!(e.kind, ParseErrorKind::InvalidNumber { .. })),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn relaxed_numbers_accept_trailing_dots() {
    let material = parse(b"ambient[]={\"1.\", 2., 3, \"4..\"};").expect("parse");
    assert_eq!(material.ambient, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn case_insensitive_keys_toggle() {
    let src = b"DiFfUse[] = {1,1,1,1};";

    let material = parse(src).expect("parse");
    assert_eq!(material.diffuse, vec![1.0; 4]);
    assert!(material.extras.is_empty());

    let options = ParseOptions {
        case_insensitive: false,
        ..ParseOptions::default()
    };
    let material = parse_with(src, &options).expect("parse");
    assert!(material.diffuse.is_empty());
    assert_eq!(material.extras.len(), 1);
    assert_eq!(material.extras[0].name(), "DiFfUse");
}

#[test]
fn comments_can_be_disabled() {
    let src = b"// note\nspecularPower=1;";
    assert!(parse(src).is_ok());

    let options = ParseOptions {
        allow_comments: false,
        ..ParseOptions::default()
    };
    match parse_with(src, &options) {
        Err(Error::Lex(e)) => {
            assert_eq!(e.kind, LexErrorKind::UnexpectedCharacter('/'));
            assert_eq!(e.position, Position::new(1, 1));
        }
        other => panic!("expected lex error, got {:?}", other),
    }
}

#[test]
fn unterminated_string_is_lex_error() {
    let err = parse(b"PixelShaderID=\"Super;").expect_err("unterminated");
    match err {
        Error::Lex(e) => {
            assert_eq!(e.kind, LexErrorKind::UnterminatedString);
            assert_eq!(e.position.line, 1);
        }
        other => panic!("expected lex error, got {:?}", other),
    }
}

#[test]
fn parse_error_carries_position() {
    let err = parse(b"ambient[]={1,1,1,1};\nclass Stage1\n{\n texture \"a.paa\";\n};").expect_err("missing '='");
    assert_eq!(err.position(), Some(Position::new(4, 10)));
    let message = err.to_string();
    assert!(message.starts_with("parse error at 4:10"), "{}", message);
}

#[test]
fn stage_with_base_is_generic() {
    let material = parse(b"class Stage1 : Stage0 { texture=\"a.paa\"; };").expect("parse");
    assert!(material.stages.is_empty());
    match &material.extras[0] {
        Node::Class(class) => {
            assert_eq!(class.base, "Stage0");
            assert_eq!(class.body.len(), 1);
        }
        other => panic!("expected class, got {:?}", other),
    }
}

#[test]
fn texgen_keeps_base_and_nested_uv() {
    let src = b"class TexGen1 : TexGen0 { uvSource=\"tex1\"; class uvTransform { aside[]={2,0,0}; junk[]={1}; }; };";
    let material = parse(src).expect("parse");
    let texgen = &material.texgens[0];
    assert_eq!(texgen.base, "TexGen0");
    assert_eq!(texgen.uv_source, "tex1");
    let uv = texgen.uv_transform.as_ref().expect("uvTransform");
    assert_eq!(uv.aside, vec![2.0, 0.0, 0.0]);
    assert!(uv.up.is_empty());
}

#[test]
fn numeric_texgen_reference() {
    let material = parse(b"class Stage3 { texture=\"a.paa\"; texGen=2; };").expect("parse");
    assert_eq!(material.stages[0].texgen, "2");
}

#[test]
fn digit_led_identifier_is_not_a_number() {
    let material = parse(b"flag = 1specular;").expect("parse");
    match &material.extras[0] {
        Node::Assign(assign) => assert_eq!(assign.value, Value::Ident("1specular".to_string())),
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn empty_input_is_empty_material() {
    let material = parse(b"  \n// nothing\n").expect("parse");
    assert_eq!(material, rvmat::Material::default());
}

#[test]
fn texture_artifacts_are_normalized() {
    let src = b"class Stage1 { texture = \" texture=\"\"a\\b_co.paa\"\"; \"; };";
    let material = parse(src).expect("parse");
    assert_eq!(material.stages[0].texture.raw, "a\\b_co.paa");
}
