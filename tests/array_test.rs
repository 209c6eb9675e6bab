mod common;
use common::*;

#[test]
fn test_numeric_array() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "DIM A(3):A(2)=5:PRINT A(1);A(2);A(3)"), "050\n");
}

#[test]
fn test_two_dimensions() {
    let mut r = program(&[
        "10 DIM M(2,3)",
        "20 FOR I=1 TO 2: FOR J=1 TO 3",
        "30 M(I,J)=I*10+J",
        "40 NEXT J: NEXT I",
        "50 PRINT M(1,1);\" \";M(1,3);\" \";M(2,1);\" \";M(2,3)",
    ]);
    assert_eq!(exec(&mut r, "RUN"), "11 13 21 23\n");
}

#[test]
fn test_subscript_errors() {
    let mut r = runtime();
    exec(&mut r, "DIM A(3)");
    assert_eq!(exec(&mut r, "PRINT A(0)"), "?BAD ARRAY INDEX\n");
    assert_eq!(exec(&mut r, "PRINT A(4)"), "?BAD ARRAY INDEX\n");
    assert_eq!(exec(&mut r, "PRINT A(1,1)"), "?WRONG ARRAY DIMS\n");
    assert_eq!(exec(&mut r, "PRINT B(1)"), "?VARIABLE NOT FOUND\n");
    assert_eq!(exec(&mut r, "DIM C(0)"), "?BAD ARRAY INDEX\n");
    assert_eq!(exec(&mut r, "PRINT A(1"), "?MISSING BRACKET\n");
}

#[test]
fn test_redim_replaces() {
    let mut r = runtime();
    exec(&mut r, "DIM A(3):A(1)=9");
    assert_eq!(exec(&mut r, "DIM A(2):PRINT A(1)"), "0\n");
    assert_eq!(exec(&mut r, "PRINT A(3)"), "?BAD ARRAY INDEX\n");
}

#[test]
fn test_array_and_scalar_share_name() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "A=7:DIM A(2):A(1)=3:PRINT A;A(1)"), "73\n");
}

#[test]
fn test_string_array() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "DIM S$(3)"), "");
    assert_eq!(exec(&mut r, "S$(2)=\"HELLO\":S$(1)=\"A\""), "");
    assert_eq!(exec(&mut r, "PRINT S$(1);\"/\";S$(2);\"/\";S$(3)"), "A/HELLO/\n");
    assert_eq!(exec(&mut r, "S$(2)=\"HI\":PRINT S$(1);S$(2);LEN(S$(3))"), "AHI0\n");
    assert_eq!(exec(&mut r, "S$(1)=5"), "?STRING EXPR EXPECTED\n");
}

#[test]
fn test_string_array_keeps_other_variables() {
    let mut r = runtime();
    exec(&mut r, "X=1:DIM S$(2):Y$=\"Y\":Z=3");
    exec(&mut r, "S$(1)=\"A LONGER STRING\":S$(2)=\"B\"");
    assert_eq!(exec(&mut r, "PRINT X;Y$;Z;S$(1);S$(2)"), "1Y3A LONGER STRINGB\n");
    exec(&mut r, "S$(1)=\"\"");
    assert_eq!(exec(&mut r, "PRINT X;Y$;Z;S$(1);S$(2)"), "1Y3B\n");
}

#[test]
fn test_computed_subscripts() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "DIM A(5):I=2:A(I*2)=8:PRINT A(4)"), "8\n");
}
