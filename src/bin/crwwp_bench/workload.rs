// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Read/write decision plan shared by every worker in a round.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read,
    Write,
}

/// `ops` pre-drawn decisions. Every worker walks the same sequence so rounds
/// for different contenders see identical work.
pub struct Plan {
    ops: Vec<Op>,
}

impl Plan {
    /// Draw `count` decisions where roughly `write_ratio` percent are writes.
    ///
    /// Each decision is one random byte compared against `ratio * 255 / 100`.
    pub fn generate(count: usize, write_ratio: u8, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let threshold = u32::from(write_ratio) * 255 / 100;
        let ops = (0..count)
            .map(|_| {
                if u32::from(rng.gen::<u8>()) < threshold {
                    Op::Write
                } else {
                    Op::Read
                }
            })
            .collect();
        Self { ops }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn writes(&self) -> usize {
        self.ops.iter().filter(|&&op| op == Op::Write).count()
    }

    pub fn reads(&self) -> usize {
        self.len() - self.writes()
    }
}
