//! Unroll generator for the small-shape multiplication kernels.
//!
//! Writes `$OUT_DIR/unrolled.rs`, which `src/kernels/mod.rs` pulls in with
//! `include!`. For a bound `N` it emits:
//!
//! - `mul_exact`: one fully unrolled arm per `(rows_a, inner, cols_b)` with all
//!   three in `1..=N`. Every output element is a literal sum of products.
//! - `mul_fixed_inner`: one arm per `inner` in `1..=N`, looping over rows and
//!   columns but with the inner sum still written out term by term.
//!
//! The bound comes from the `unroll-*` features (largest wins), `no-unroll`
//! forces it to 0, and `FIXED_MATRIX_UNROLL_BOUND` overrides both.

use std::env;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// `mul_exact` is instantiated in full for every shape before dead arms are
/// pruned. At 7 its `N^3` arms already exhaust memory in rustc.
const MAX_BOUND: usize = 6;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=FIXED_MATRIX_UNROLL_BOUND");

    let bound = unroll_bound();
    let inline = if feature_enabled("FORCE_INLINE") {
        "#[inline(always)]"
    } else {
        "#[inline]"
    };

    let mut out = String::new();
    writeln!(out, "// @generated by build.rs, do not edit.").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "/// Largest dimension with generated kernels (0 disables Tiers 1 and 2).").unwrap();
    writeln!(out, "pub const UNROLL_BOUND: usize = {bound};").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "/// Largest value `FIXED_MATRIX_UNROLL_BOUND` accepts.").unwrap();
    writeln!(out, "pub const MAX_UNROLL_BOUND: usize = {MAX_BOUND};").unwrap();
    writeln!(out).unwrap();
    emit_exact(&mut out, bound, inline);
    writeln!(out).unwrap();
    emit_fixed_inner(&mut out, bound, inline);

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("unrolled.rs");
    fs::write(&dest_path, out).unwrap();
}

fn feature_enabled(name: &str) -> bool {
    env::var_os(format!("CARGO_FEATURE_{name}")).is_some()
}

fn unroll_bound() -> usize {
    if let Ok(raw) = env::var("FIXED_MATRIX_UNROLL_BOUND") {
        match raw.trim().parse::<usize>() {
            Ok(bound) if bound <= MAX_BOUND => return bound,
            _ => println!(
                "cargo:warning=ignoring FIXED_MATRIX_UNROLL_BOUND={raw:?}, expected 0..={MAX_BOUND}"
            ),
        }
    }

    if feature_enabled("NO_UNROLL") {
        return 0;
    }

    [(5, "UNROLL_5"), (4, "UNROLL_4"), (3, "UNROLL_3")]
        .into_iter()
        .find(|(_, feature)| feature_enabled(feature))
        .map_or(0, |(bound, _)| bound)
}

fn emit_signature(out: &mut String, name: &str, inline: &str) {
    writeln!(out, "{inline}").unwrap();
    writeln!(out, "#[allow(clippy::identity_op, clippy::erasing_op, unused_variables)]").unwrap();
    writeln!(
        out,
        "pub(crate) fn {name}<TA, TB, TC, const R: usize, const K: usize, const C: usize>("
    )
    .unwrap();
    writeln!(out, "    a: &[TA],").unwrap();
    writeln!(out, "    b: &[TB],").unwrap();
    writeln!(out, "    c: &mut [TC],").unwrap();
    writeln!(out, ") where").unwrap();
    writeln!(out, "    TA: Promote<TB>,").unwrap();
    writeln!(out, "    TB: Element,").unwrap();
    writeln!(out, "    TC: Element,").unwrap();
    writeln!(out, "    Product<TA, TB>: AsPrimitive<TC>,").unwrap();
    writeln!(out, "{{").unwrap();
    // Re-slicing to the exact lengths lets the optimizer drop the bounds checks.
    writeln!(out, "    let (a, b, c) = (&a[..R * K], &b[..K * C], &mut c[..R * C]);").unwrap();
}

// One arm per exact shape: rows_a x inner * inner x cols_b -> rows_a x cols_b
fn emit_exact(out: &mut String, bound: usize, inline: &str) {
    writeln!(out, "/// Tier 1: fully unrolled kernels for every shape up to").unwrap();
    writeln!(out, "/// `UNROLL_BOUND x UNROLL_BOUND * UNROLL_BOUND x UNROLL_BOUND`.").unwrap();
    emit_signature(out, "mul_exact", inline);
    writeln!(out, "    match (R, K, C) {{").unwrap();

    for inner in 1..=bound {
        for rows_a in 1..=bound {
            for cols_b in 1..=bound {
                writeln!(
                    out,
                    "        // {rows_a}x{inner} * {inner}x{cols_b} -> {rows_a}x{cols_b}"
                )
                .unwrap();
                writeln!(out, "        ({rows_a}, {inner}, {cols_b}) => {{").unwrap();
                for row in 0..rows_a {
                    for col in 0..cols_b {
                        let terms = (0..inner)
                            .map(|k| {
                                format!(
                                    "product(a[{}], b[{}])",
                                    row * inner + k,
                                    k * cols_b + col
                                )
                            })
                            .collect::<Vec<_>>()
                            .join(" + ");
                        writeln!(out, "            c[{}] = ({terms}).as_();", row * cols_b + col)
                            .unwrap();
                    }
                }
                writeln!(out, "        }}").unwrap();
            }
        }
    }

    writeln!(
        out,
        "        _ => unreachable!(\"no unrolled kernel for {{}}x{{}} * {{}}x{{}}\", R, K, K, C),"
    )
    .unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
}

// One arm per inner dimension: n1 x inner * inner x n2
fn emit_fixed_inner(out: &mut String, bound: usize, inline: &str) {
    writeln!(out, "/// Tier 2: row/column loops with the inner sum written out for").unwrap();
    writeln!(out, "/// every inner dimension up to `UNROLL_BOUND`.").unwrap();
    emit_signature(out, "mul_fixed_inner", inline);
    writeln!(out, "    match K {{").unwrap();

    for inner in 1..=bound {
        let terms = (0..inner)
            .map(|k| match k {
                0 => "product(a[0], b[col])".to_string(),
                1 => "product(a[1], b[C + col])".to_string(),
                _ => format!("product(a[{k}], b[{k} * C + col])"),
            })
            .collect::<Vec<_>>()
            .join(" + ");

        writeln!(out, "        // n1x{inner} * {inner}xn2").unwrap();
        writeln!(out, "        {inner} => {{").unwrap();
        writeln!(out, "            for row in 0..R {{").unwrap();
        writeln!(out, "                let a = &a[row * {inner}..(row + 1) * {inner}];").unwrap();
        writeln!(out, "                for col in 0..C {{").unwrap();
        writeln!(out, "                    c[row * C + col] = ({terms}).as_();").unwrap();
        writeln!(out, "                }}").unwrap();
        writeln!(out, "            }}").unwrap();
        writeln!(out, "        }}").unwrap();
    }

    writeln!(
        out,
        "        _ => unreachable!(\"no fixed-inner kernel for inner dimension {{}}\", K),"
    )
    .unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
}
