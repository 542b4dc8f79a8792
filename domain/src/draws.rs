//! Keno draw records served by the archive parser.
//!
//! The first few steps of every run replay a fixed list of published draws.
//! Every later step synthesizes a record from its step index alone, so two runs
//! always produce the same sequence.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Draw number of the most recent draw in the archive. Older draws count down from here.
pub const FIRST_DRAW_NUMBER: u32 = 3_147_000;

/// Count of numbers drawn in a single Keno draw.
pub const NUMBERS_PER_DRAW: usize = 20;

// Synthesized numbers are folded into 1..=SYNTHESIZED_NUMBER_RANGE.
const SYNTHESIZED_NUMBER_RANGE: usize = 80;
const SYNTHESIZED_YEAR: u32 = 2025;

/// One Keno draw result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawRecord {
    /// Sequential identifier of the draw.
    #[schema(example = 3147000)]
    pub draw_number: u32,
    /// Draw date as `DD.MM.YYYY`. Synthesized records are neither zero padded nor validated.
    #[schema(example = "28.10.2025")]
    pub date: String,
    /// The numbers drawn, in ascending order.
    pub numbers: Vec<u8>,
}

struct SeedDraw {
    draw_number: u32,
    date: &'static str,
    numbers: [u8; NUMBERS_PER_DRAW],
}

const SEED_DRAWS: [SeedDraw; 5] = [
    SeedDraw {
        draw_number: 3_147_000,
        date: "28.10.2025",
        numbers: [
            5, 12, 18, 23, 27, 31, 34, 42, 45, 51, 56, 63, 67, 72, 78, 80, 85, 89, 92, 97,
        ],
    },
    SeedDraw {
        draw_number: 3_146_999,
        date: "27.10.2025",
        numbers: [
            3, 9, 14, 21, 28, 33, 39, 44, 48, 52, 59, 64, 69, 74, 79, 83, 87, 91, 95, 99,
        ],
    },
    SeedDraw {
        draw_number: 3_146_998,
        date: "27.10.2025",
        numbers: [
            2, 7, 15, 22, 26, 32, 38, 43, 47, 54, 58, 62, 68, 73, 77, 81, 86, 90, 94, 98,
        ],
    },
    SeedDraw {
        draw_number: 3_146_997,
        date: "26.10.2025",
        numbers: [
            1, 8, 13, 19, 25, 30, 36, 41, 46, 50, 55, 61, 66, 71, 76, 82, 88, 93, 96, 100,
        ],
    },
    SeedDraw {
        draw_number: 3_146_996,
        date: "26.10.2025",
        numbers: [
            4, 11, 17, 24, 29, 35, 40, 49, 53, 57, 60, 65, 70, 75, 84, 87, 91, 94, 97, 99,
        ],
    },
];

impl From<&SeedDraw> for DrawRecord {
    fn from(seed: &SeedDraw) -> Self {
        DrawRecord {
            draw_number: seed.draw_number,
            date: seed.date.to_string(),
            numbers: seed.numbers.to_vec(),
        }
    }
}

/// Number of literal records replayed at the start of every run.
pub fn seed_count() -> usize {
    SEED_DRAWS.len()
}

/// Returns the record emitted at `step` of a run.
pub fn draw_for_step(step: usize) -> DrawRecord {
    match SEED_DRAWS.get(step) {
        Some(seed) => seed.into(),
        None => synthesize(step),
    }
}

/// Builds a placeholder record from the step index.
///
/// The date and number formulas are reproduced as-is. Nothing here checks that
/// the date exists on a calendar or that the numbers are unique.
pub fn synthesize(step: usize) -> DrawRecord {
    let day = 28 - (step % 28) as i64;
    let month = 10 - (step / 30) as i64;

    let mut numbers: Vec<u8> = (0..NUMBERS_PER_DRAW)
        .map(|j| (((step * 7 + j * 13) % SYNTHESIZED_NUMBER_RANGE) + 1) as u8)
        .collect();
    numbers.sort_unstable();

    DrawRecord {
        draw_number: FIRST_DRAW_NUMBER.saturating_sub(step as u32),
        date: format!("{day}.{month}.{SYNTHESIZED_YEAR}"),
        numbers,
    }
}
