// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{PathDecoding, PathParser, decode_path, parse_path};

#[test]
fn test_plain_path_unchanged() {
    assert_eq!(parse_path("src/main.rs"), "src/main.rs");
    assert_eq!(parse_path("with space.txt"), "with space.txt");
    assert_eq!(parse_path(""), "");
}

#[test]
fn test_octal_utf8_decodes() {
    let decoded = decode_path("\"caf\\303\\251.txt\"");
    assert_eq!(decoded.path, "café.txt");
    assert_eq!(decoded.decoding, PathDecoding::Utf8);
}

#[test]
fn test_cjk_path_decodes() {
    // 文件.txt
    assert_eq!(
        parse_path("\"\\346\\226\\207\\344\\273\\266.txt\""),
        "文件.txt"
    );
}

#[test]
fn test_rename_keeps_destination() {
    assert_eq!(parse_path("old.txt -> new.txt"), "new.txt");
    assert_eq!(parse_path("a -> b -> c"), "c");
}

#[test]
fn test_quoted_rename_keeps_destination() {
    assert_eq!(parse_path(r#""old \"x\".txt" -> "caf\303\251.txt""#), "café.txt");
    assert_eq!(parse_path("plain.txt -> \"caf\\303\\251.txt\""), "café.txt");
}

#[test]
fn test_quoted_arrow_inside_single_token() {
    assert_eq!(parse_path("\"a -> b\""), "b");
}

#[test]
fn test_c_escapes() {
    assert_eq!(parse_path("\"tab\\there\""), "tab\there");
    assert_eq!(parse_path("\"q\\\"uote\""), "q\"uote");
    assert_eq!(parse_path("\"back\\\\slash\""), "back\\slash");
}

#[test]
fn test_invalid_utf8_falls_back_to_latin1() {
    let decoded = decode_path("\"\\351t\\351.txt\"");
    assert_eq!(decoded.path, "été.txt");
    assert_eq!(decoded.decoding, PathDecoding::Latin1);
    assert!(decoded.decoding.is_degraded());
}

#[test]
fn test_malformed_escape_returns_raw() {
    let decoded = decode_path("\"bad\\qescape\"");
    assert_eq!(decoded.path, "bad\\qescape");
    assert_eq!(decoded.decoding, PathDecoding::Raw);

    let dangling = decode_path("trailing\\");
    assert_eq!(dangling.path, "trailing\\");
    assert_eq!(dangling.decoding, PathDecoding::Raw);
}

#[test]
fn test_unbalanced_quote_is_kept() {
    assert_eq!(parse_path("\"half"), "\"half");
}

#[test]
fn test_parser_memoizes() {
    let mut parser = PathParser::new(2);
    assert_eq!(parser.parse("\"caf\\303\\251.txt\""), "café.txt");
    assert_eq!(parser.parse("\"caf\\303\\251.txt\""), "café.txt");
    assert_eq!(parser.cached(), 1);

    parser.parse("a");
    parser.parse("b");
    assert_eq!(parser.cached(), 1);

    parser.clear();
    assert_eq!(parser.cached(), 0);
}
