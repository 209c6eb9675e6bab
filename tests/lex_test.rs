mod common;
use basic::lang::{decode, tokenize, ErrorCode, Keyword, Tok, TOKEN_BUF_LEN};
use basic::mach::{BufferHost, Runtime};
use common::*;
use quickcheck::TestResult;

fn lex(s: &str) -> Result<Vec<u8>, ErrorCode> {
    let mut buf = [0u8; TOKEN_BUF_LEN];
    match tokenize(s.as_bytes(), &mut buf) {
        Ok(len) => Ok(buf[..len].to_vec()),
        Err(error) => Err(error.code()),
    }
}

#[test]
fn test_lex_errors() {
    assert_eq!(lex("PRINT \"abc"), Err(ErrorCode::UnterminatedString));
    assert_eq!(lex("A$B=1"), Err(ErrorCode::UnexpectedCharacter));
    assert_eq!(lex("PRINT @"), Err(ErrorCode::UnexpectedCharacter));
    assert_eq!(lex("1.2.3"), Err(ErrorCode::MalformedNumber));
    assert_eq!(lex(&"1+".repeat(60)), Err(ErrorCode::LineTooLong));
}

#[test]
fn test_lex_errors_reported() {
    let mut r = runtime();
    assert_eq!(exec(&mut r, "PRINT \"abc"), "?UNTERMINATED STRING\n");
    assert_eq!(exec(&mut r, "10 PRINT 1.2.3"), "?BAD NUMBER\n");
    assert_eq!(exec(&mut r, &"A".repeat(300)), "?LINE TOO LONG\n");
}

#[test]
fn test_operators_longest_match() {
    let t = lex("1<=2<>3>=4").unwrap();
    let mut pos = 0;
    let mut ops = vec![];
    loop {
        let (tok, next) = decode(&t, pos);
        match tok {
            Tok::Eol => break,
            Tok::Keyword(k) => ops.push(k),
            _ => {}
        }
        pos = next;
    }
    assert_eq!(
        ops,
        vec![Keyword::LessEqual, Keyword::NotEqual, Keyword::GreaterEqual]
    );
}

#[test]
fn test_number_lexes_back() {
    fn property(x: f32) -> TestResult {
        if !x.is_finite() || x.is_sign_negative() {
            return TestResult::discard();
        }
        let t = lex(&format!("{}", x)).unwrap();
        TestResult::from_bool(match decode(&t, 0).0 {
            Tok::Number(v) => v == x,
            Tok::Integer(i) => i as f32 == x,
            _ => false,
        })
    }
    let mut qc = quickcheck::QuickCheck::new().tests(200);
    qc.quickcheck(property as fn(f32) -> TestResult);
}

#[test]
fn test_string_literal_lexes_back() {
    fn property(s: String) -> TestResult {
        if s.len() > 100 || !s.bytes().all(|b| b == b' ' || b.is_ascii_graphic()) {
            return TestResult::discard();
        }
        let text = format!("PRINT \"{}\"", s.replace('"', "\"\""));
        let t = lex(&text).unwrap();
        let (_, next) = decode(&t, 0);
        TestResult::from_bool(match decode(&t, next).0 {
            Tok::Str { at, len } => &t[at..at + len] == s.as_bytes(),
            _ => false,
        })
    }
    let mut qc = quickcheck::QuickCheck::new().tests(200);
    qc.quickcheck(property as fn(String) -> TestResult);
}

const STATEMENTS: &[&str] = &[
    "print \"A\";b",
    "FOR I=1 TO 10 STEP 2",
    "NEXT I",
    "IF A<>B THEN GOTO 10",
    "X=(1+2)*3 MOD 4",
    "REM  spaced   text",
    "GOSUB 100: RETURN",
    "DIM A$(3,4)",
    "PRINT LEFT$(\"AB\",1);MID$(S$,1,2)",
    "A$=\"SAY \"\"HI\"\"\"",
    "PRINT 1.5;-2;NOT 0 AND 1 OR 0",
    "INPUT N",
    "LIST 10,20",
    "PAUSE 100: CLS",
    "PRINT A B;1.5 .5;X 2",
];

fn listing(r: &mut Runtime<BufferHost>) -> String {
    r.enter("LIST").unwrap();
    r.host_mut().take_output()
}

#[test]
fn test_listing_reenters_unchanged() {
    fn property(lines: Vec<(u16, u8)>) -> bool {
        let mut r = Runtime::new(BufferHost::new(), 65535);
        for (number, index) in lines {
            let statement = STATEMENTS[index as usize % STATEMENTS.len()];
            r.enter(&format!("{} {}", number.max(1), statement)).unwrap();
        }
        let first = listing(&mut r);
        let mut again = Runtime::new(BufferHost::new(), 65535);
        for line in first.lines() {
            again.enter(line).unwrap();
        }
        listing(&mut again) == first
    }
    let mut qc = quickcheck::QuickCheck::new().tests(50);
    qc.quickcheck(property as fn(Vec<(u16, u8)>) -> bool);
}
