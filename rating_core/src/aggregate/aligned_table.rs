use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::series::rating_series::RatingSeriesStore;

/// Several teams' ratings joined on date, one column per team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedTable {
    pub teams: Vec<String>,
    pub rows: Vec<AlignedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedRow {
    pub date: NaiveDate,
    /// One value per team, in `AlignedTable::teams` order
    pub ratings: Vec<Option<f64>>,
}

impl AlignedTable {
    /// Outer join on the union of all dates
    pub fn new(stores: &[RatingSeriesStore]) -> Self {
        let dates: BTreeSet<NaiveDate> = stores
            .iter()
            .flat_map(|s| s.points().iter().map(|p| p.date))
            .collect();

        // every store is date-ordered, so walk each with its own cursor
        let mut cursors = vec![0usize; stores.len()];
        let rows = dates
            .into_iter()
            .map(|date| {
                let ratings = stores
                    .iter()
                    .zip(cursors.iter_mut())
                    .map(|(store, cursor)| match store.point_at(*cursor) {
                        Some(p) if p.date == date => {
                            *cursor += 1;
                            Some(p.rating)
                        }
                        _ => None,
                    })
                    .collect();
                AlignedRow { date, ratings }
            })
            .collect();

        Self {
            teams: stores.iter().map(|s| s.name().to_string()).collect(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, team: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.teams.iter().position(|t| t == team)?;
        Some(self.rows.iter().map(|r| r.ratings[idx]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::rating_point::RatingPoint;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_outer_join() {
        let a = RatingSeriesStore::new(
            "A",
            vec![
                RatingPoint::new(ymd(2020, 1, 1), 1500.0),
                RatingPoint::new(ymd(2020, 1, 3), 1510.0),
            ],
        )
        .unwrap();
        let b = RatingSeriesStore::new(
            "B",
            vec![
                RatingPoint::new(ymd(2020, 1, 2), 1700.0),
                RatingPoint::new(ymd(2020, 1, 3), 1690.0),
            ],
        )
        .unwrap();

        let table = AlignedTable::new(&[a, b]);
        assert_eq!(table.teams, vec!["A", "B"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0].date, ymd(2020, 1, 1));
        assert_eq!(table.column("A").unwrap(), vec![Some(1500.0), None, Some(1510.0)]);
        assert_eq!(table.column("B").unwrap(), vec![None, Some(1700.0), Some(1690.0)]);
        assert!(table.column("C").is_none());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(AlignedTable::new(&[]).is_empty());
        let empty = RatingSeriesStore::new("E", vec![]).unwrap();
        let table = AlignedTable::new(&[empty]);
        assert!(table.is_empty());
        assert_eq!(table.teams, vec!["E"]);
    }
}
