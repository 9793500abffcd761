/*
* Licensed to Elasticsearch B.V. under one or more contributor
* license agreements. See the NOTICE file distributed with
* this work for additional information regarding copyright
* ownership. Elasticsearch B.V. licenses this file to you under
* the Apache License, Version 2.0 (the "License"); you may
* not use this file except in compliance with the License.
* You may obtain a copy of the License at
*
*  http://www.apache.org/licenses/LICENSE-2.0
*
* Unless required by applicable law or agreed to in writing,
* software distributed under the License is distributed on an
* "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
* KIND, either express or implied.  See the License for the
* specific language governing permissions and limitations
* under the License.
*/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stats_disco::{compute_statistics, JointTables};

fn uniform(len: usize) -> (Vec<f64>, Vec<f64>) {
    let values = (0..len).map(|i| i as f64 * 1.5 - 7.0).collect();
    let probs = vec![1.0 / len as f64; len];
    (values, probs)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Joint tables");
    for len in [4usize, 16, 48].iter() {
        let (x, px) = uniform(*len);
        let (y, py) = uniform(*len);
        group.bench_with_input(BenchmarkId::from_parameter(len), len, |b, _| {
            b.iter(|| JointTables::new(black_box(&x), black_box(&y), &px, &py))
        });
    }
    group.finish();

    let (x, px) = uniform(48);
    c.bench_function("Moment statistics of 48 values", |b| {
        b.iter(|| compute_statistics(black_box(&x), black_box(&px)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
