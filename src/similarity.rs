//! loadChildren の参照文字列とファイル識別子のあいまい照合。
//!
//! 参照 (`./admin/admin.module`) とファイル識別子 (`admin/admin.routes.ts`) は
//! 拡張子も階層も一致しないため、文字列の類似度で最も近いファイルを選ぶ。

use std::collections::HashMap;

/// 2 つの文字列の類似度 (0.0 〜 1.0) を返すスコア関数
pub trait Similarity {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// 文字バイグラムの Dice 係数。空白は比較前に取り除く
#[derive(Debug, Clone, Copy, Default)]
pub struct DiceCoefficient;

impl Similarity for DiceCoefficient {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().filter(|c| !c.is_whitespace()).collect();
        let b: Vec<char> = b.chars().filter(|c| !c.is_whitespace()).collect();

        if a == b {
            return 1.0;
        }
        if a.len() < 2 || b.len() < 2 {
            return 0.0;
        }

        let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
        for pair in a.windows(2) {
            *bigrams.entry((pair[0], pair[1])).or_default() += 1;
        }

        let mut intersection = 0usize;
        for pair in b.windows(2) {
            if let Some(count) = bigrams.get_mut(&(pair[0], pair[1])) {
                if *count > 0 {
                    *count -= 1;
                    intersection += 1;
                }
            }
        }

        (2 * intersection) as f64 / (a.len() + b.len() - 2) as f64
    }
}

/// best_match の結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch<'a> {
    pub index: usize,
    pub target: &'a str,
    pub rating: f64,
}

/// 全候補のスコアを計算し、最も高いものを返す。
///
/// 同点の場合は先に現れた候補が選ばれる。参照元ファイル自身が候補に含まれていても
/// そのまま比較するので、自分自身が選ばれることもある (リンク側で扱う)。
/// 候補が空なら `None`。
pub fn best_match<'a, S, I>(scorer: &S, reference: &str, candidates: I) -> Option<BestMatch<'a>>
where
    S: Similarity + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<BestMatch<'a>> = None;
    for (index, target) in candidates.into_iter().enumerate() {
        let rating = scorer.score(reference, target);
        if best.is_none_or(|current| rating > current.rating) {
            best = Some(BestMatch {
                index,
                target,
                rating,
            });
        }
    }
    best
}
