use crate::team::TeamId;

/// Teams sharing the highest `score`, in input order.
pub fn find_max<F>(teams: &[TeamId], score: F) -> Vec<TeamId>
where
    F: Fn(TeamId) -> u32,
{
    let mut max_teams = Vec::new();
    let mut max_score = 0;

    for &team in teams {
        let s = score(team);
        if s > max_score {
            max_teams.clear();
            max_score = s;
        }
        if s >= max_score {
            max_teams.push(team);
        }
    }

    max_teams
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_max() {
        let teams = [TeamId(1), TeamId(2), TeamId(3)];
        let scores = [4, 9, 2];
        assert_eq!(find_max(&teams, |t| scores[t.0 as usize - 1]), vec![TeamId(2)]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let teams = [TeamId(3), TeamId(1), TeamId(2)];
        assert_eq!(find_max(&teams, |t| if t.0 == 2 { 1 } else { 5 }), vec![TeamId(3), TeamId(1)]);
    }

    #[test]
    fn test_all_zero_is_full_tie() {
        let teams = [TeamId(1), TeamId(2)];
        assert_eq!(find_max(&teams, |_| 0), teams.to_vec());
        assert!(find_max(&[], |_| 0).is_empty());
    }
}
