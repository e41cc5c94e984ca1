// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Benchmarks for the arithmetic grammar: packrat memoization on and off
//! across inputs of increasing nesting depth.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sprig_parser::{
    ParseOptions, define_rule, list, one, parse_with_options, plus, range, rule,
};
use std::hint::black_box;

rule! { num = plus(range(b'0'..=b'9')) }
rule! { value = &num | (one("(") & &expr & one(")")) }
rule! { product = list(&value, one("*/")) }
rule! { sum = list(&product, one("+-")) }
rule! { expr }
define_rule! { expr = &sum }

fn benchmark_arithmetic(c: &mut Criterion) {
    let test_cases = vec![
        ("Single", "7".to_string()),
        ("Flat", "1+2+3+4+5+6+7+8+9+10".to_string()),
        ("Calculator", "(1+2)/3*5*6-2".to_string()),
        ("Nested", {
            let mut s = String::new();
            for _ in 0..64 {
                s.push('(');
            }
            s.push('1');
            for _ in 0..64 {
                s.push_str("+1)");
            }
            s
        }),
        ("Wide", {
            let terms: Vec<String> = (0..256).map(|n| format!("{}", n % 100)).collect();
            terms.join("*")
        }),
    ];

    let mut group = c.benchmark_group("arithmetic");

    for (name, input) in test_cases.iter() {
        group.bench_with_input(BenchmarkId::new("packrat", name), input, |b, input| {
            b.iter(|| {
                black_box(parse_with_options(
                    &expr,
                    black_box(input.as_str()),
                    ParseOptions { packrat: true },
                ))
            })
        });

        group.bench_with_input(BenchmarkId::new("descent", name), input, |b, input| {
            b.iter(|| {
                black_box(parse_with_options(
                    &expr,
                    black_box(input.as_str()),
                    ParseOptions { packrat: false },
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_arithmetic);
criterion_main!(benches);
