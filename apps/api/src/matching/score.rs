use crate::matching::keywords::extract_keywords;

/// Computes a 0–100 match score between a job's text and a candidate's text.
///
/// Jaccard index over the two keyword sets, scaled by 5x and clamped to 100
/// (truncating toward zero). The scaling compensates for Jaccard running low
/// on long texts; it is a compatibility-critical heuristic and must not be
/// "improved". An empty job keyword set scores 0 regardless of the candidate
/// text — a job with no description and a job that is entirely stopwords are
/// indistinguishable here, by longstanding behavior.
pub fn match_score(job_text: &str, candidate_text: &str) -> u32 {
    let job_keywords = extract_keywords(job_text);
    let candidate_keywords = extract_keywords(candidate_text);

    if job_keywords.is_empty() {
        return 0;
    }

    let intersection = job_keywords.intersection(&candidate_keywords).count();
    let union = job_keywords.union(&candidate_keywords).count();

    if union == 0 {
        return 0;
    }

    let jaccard = intersection as f64 / union as f64;
    (jaccard * 500.0).min(100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_job_text_scores_zero() {
        assert_eq!(match_score("", "python java"), 0);
    }

    #[test]
    fn test_empty_candidate_text_scores_zero() {
        // Union is the job's own keywords, intersection is empty.
        assert_eq!(match_score("python java", ""), 0);
    }

    #[test]
    fn test_both_empty_scores_zero() {
        assert_eq!(match_score("", ""), 0);
    }

    #[test]
    fn test_stopword_only_job_scores_zero() {
        assert_eq!(match_score("the and of", "python developer"), 0);
    }

    #[test]
    fn test_disjoint_keyword_sets_score_zero() {
        assert_eq!(match_score("rust systems kernel", "bakery pastry chef"), 0);
    }

    #[test]
    fn test_identical_texts_score_100() {
        // Jaccard = 1.0, scaled and clamped to 100.
        let text = "Senior Python Developer with Django";
        assert_eq!(match_score(text, text), 100);
    }

    #[test]
    fn test_single_shared_keyword_example() {
        // job {python, developer, needed}, candidate {experienced, python,
        // engineer}: I=1, U=5, J=0.2, 0.2*500 clamps to 100.
        assert_eq!(
            match_score("Python developer needed", "Experienced Python engineer"),
            100
        );
    }

    #[test]
    fn test_partial_overlap_scales_by_five() {
        // job {a1..a9, shared}, candidate {b1..b9, shared}: I=1, U=19,
        // J=1/19, *500 = 26.31... -> truncates to 26.
        let job = "a1 a2 a3 a4 a5 a6 a7 a8 a9 shared";
        let candidate = "b1 b2 b3 b4 b5 b6 b7 b8 b9 shared";
        assert_eq!(match_score(job, candidate), 26);
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let cases = [
            ("rust", "rust"),
            ("rust go python", "rust"),
            ("one two three four five", "three"),
        ];
        for (job, cand) in cases {
            let score = match_score(job, cand);
            assert!(score <= 100, "score {score} out of range for ({job}, {cand})");
        }
    }

    #[test]
    fn test_symmetric_when_neither_side_empty() {
        let a = "rust distributed systems engineer";
        let b = "python rust backend engineer";
        assert_eq!(match_score(a, b), match_score(b, a));
    }
}
