use chrono::NaiveDate;
use serde::Serialize;
use std::ops::Index;

use super::rating_point::RatingPoint;
use crate::common::{
    enums::DuplicatePolicy,
    rating_exception::{ErrCode, RatingError},
    time::to_date_str,
};

/// Immutable, date-ordered rating history of a single team.
///
/// Dates are strictly increasing and every rating is finite. An empty store
/// is allowed; queries that need data report `EMPTY_STORE` or `EMPTY_RANGE`.
/// Transformations return new stores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSeriesStore {
    name: String,
    points: Vec<RatingPoint>,
}

impl RatingSeriesStore {
    /// Build a store from points already in date order
    pub fn new(name: impl Into<String>, points: Vec<RatingPoint>) -> Result<Self, RatingError> {
        let name = name.into();
        check_finite(&name, &points)?;

        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(RatingError::new(
                    format!(
                        "{}: dates must be strictly increasing, {} follows {}",
                        name,
                        to_date_str(pair[1].date),
                        to_date_str(pair[0].date)
                    ),
                    ErrCode::InvalidInput,
                ));
            }
        }

        Ok(Self { name, points })
    }

    /// Build a store from points in any order, resolving equal dates with `policy`
    pub fn from_unsorted(
        name: impl Into<String>,
        mut points: Vec<RatingPoint>,
        policy: DuplicatePolicy,
    ) -> Result<Self, RatingError> {
        let name = name.into();
        check_finite(&name, &points)?;

        // stable, so equal dates keep their input order
        points.sort_by_key(|p| p.date);

        let mut merged: Vec<RatingPoint> = Vec::with_capacity(points.len());
        for point in points {
            match merged.last_mut() {
                Some(last) if last.date == point.date => match policy {
                    DuplicatePolicy::Reject => {
                        return Err(RatingError::new(
                            format!("{}: duplicate date {}", name, to_date_str(point.date)),
                            ErrCode::InvalidInput,
                        ));
                    }
                    DuplicatePolicy::KeepFirst => {}
                    DuplicatePolicy::KeepLast => *last = point,
                },
                _ => merged.push(point),
            }
        }

        Ok(Self {
            name,
            points: merged,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point_at(&self, index: usize) -> Option<&RatingPoint> {
        self.points.get(index)
    }

    pub fn earliest(&self) -> Option<&RatingPoint> {
        self.points.first()
    }

    pub fn latest(&self) -> Option<&RatingPoint> {
        self.points.last()
    }

    pub fn points(&self) -> &[RatingPoint] {
        &self.points
    }

    pub fn ratings(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.rating)
    }

    /// Points with `from <= date <= to`, as a new store
    pub fn slice(&self, from: NaiveDate, to: NaiveDate) -> Result<Self, RatingError> {
        let begin = self.points.partition_point(|p| p.date < from);
        let end = self.points.partition_point(|p| p.date <= to);

        if from > to || begin >= end {
            return Err(RatingError::new(
                format!(
                    "{}: no points between {} and {}",
                    self.name,
                    to_date_str(from),
                    to_date_str(to)
                ),
                ErrCode::EmptyRange,
            ));
        }

        Ok(Self {
            name: self.name.clone(),
            points: self.points[begin..end].to_vec(),
        })
    }

    /// Points on or after `from`
    pub fn since(&self, from: NaiveDate) -> Result<Self, RatingError> {
        match self.latest() {
            Some(last) => self.slice(from, last.date),
            None => Err(RatingError::new(
                format!("{}: no points since {}", self.name, to_date_str(from)),
                ErrCode::EmptyRange,
            )),
        }
    }

    /// Most recent point dated on or before `date`
    pub fn last_on_or_before(&self, date: NaiveDate) -> Option<&RatingPoint> {
        let idx = self.points.partition_point(|p| p.date <= date);
        idx.checked_sub(1).map(|i| &self.points[i])
    }

    /// Earliest point dated on or after `date`
    pub fn first_on_or_after(&self, date: NaiveDate) -> Option<&RatingPoint> {
        let idx = self.points.partition_point(|p| p.date < date);
        self.points.get(idx)
    }
}

impl Index<usize> for RatingSeriesStore {
    type Output = RatingPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

fn check_finite(name: &str, points: &[RatingPoint]) -> Result<(), RatingError> {
    match points.iter().find(|p| !p.rating.is_finite()) {
        Some(bad) => Err(RatingError::new(
            format!(
                "{}: rating {} on {} is not finite",
                name,
                bad.rating,
                to_date_str(bad.date)
            ),
            ErrCode::InvalidInput,
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> RatingSeriesStore {
        RatingSeriesStore::new(
            "Liverpool",
            vec![
                RatingPoint::new(ymd(2020, 1, 1), 1500.0),
                RatingPoint::new(ymd(2020, 6, 1), 1550.0),
                RatingPoint::new(ymd(2021, 1, 1), 1600.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let s = sample();
        assert_eq!(s.name(), "Liverpool");
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.earliest().unwrap().rating, 1500.0);
        assert_eq!(s.latest().unwrap().date, ymd(2021, 1, 1));
        assert_eq!(s.point_at(1).unwrap().rating, 1550.0);
        assert!(s.point_at(3).is_none());
        assert_eq!(s[2].rating, 1600.0);
        assert_eq!(s.ratings().collect::<Vec<_>>(), vec![1500.0, 1550.0, 1600.0]);
    }

    #[test]
    fn test_empty_store_is_valid() {
        let s = RatingSeriesStore::new("Nobody", vec![]).unwrap();
        assert!(s.is_empty());
        assert!(s.latest().is_none());
        assert!(s.earliest().is_none());
        assert_eq!(s.since(ymd(2020, 1, 1)).unwrap_err().errcode, ErrCode::EmptyRange);
    }

    #[test]
    fn test_rejects_unordered_dates() {
        let err = RatingSeriesStore::new(
            "X",
            vec![
                RatingPoint::new(ymd(2020, 6, 1), 1500.0),
                RatingPoint::new(ymd(2020, 1, 1), 1510.0),
            ],
        )
        .unwrap_err();
        assert_eq!(err.errcode, ErrCode::InvalidInput);

        let err = RatingSeriesStore::new(
            "X",
            vec![
                RatingPoint::new(ymd(2020, 1, 1), 1500.0),
                RatingPoint::new(ymd(2020, 1, 1), 1510.0),
            ],
        )
        .unwrap_err();
        assert_eq!(err.errcode, ErrCode::InvalidInput);
    }

    #[test]
    fn test_rejects_non_finite_rating() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = RatingSeriesStore::new("X", vec![RatingPoint::new(ymd(2020, 1, 1), bad)])
                .unwrap_err();
            assert_eq!(err.errcode, ErrCode::InvalidInput);
        }
    }

    #[test]
    fn test_from_unsorted_policies() {
        let raw = vec![
            RatingPoint::new(ymd(2020, 6, 1), 1550.0),
            RatingPoint::new(ymd(2020, 1, 1), 1500.0),
            RatingPoint::new(ymd(2020, 6, 1), 1555.0),
        ];

        let err = RatingSeriesStore::from_unsorted("X", raw.clone(), DuplicatePolicy::Reject)
            .unwrap_err();
        assert_eq!(err.errcode, ErrCode::InvalidInput);

        let first =
            RatingSeriesStore::from_unsorted("X", raw.clone(), DuplicatePolicy::KeepFirst).unwrap();
        assert_eq!(first.ratings().collect::<Vec<_>>(), vec![1500.0, 1550.0]);

        let last = RatingSeriesStore::from_unsorted("X", raw, DuplicatePolicy::KeepLast).unwrap();
        assert_eq!(last.ratings().collect::<Vec<_>>(), vec![1500.0, 1555.0]);
        assert_eq!(last.earliest().unwrap().date, ymd(2020, 1, 1));
    }

    #[test]
    fn test_slice_inclusive_bounds() {
        let s = sample();
        let sub = s.slice(ymd(2020, 1, 1), ymd(2020, 6, 1)).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.name(), "Liverpool");

        let sub = s.slice(ymd(2020, 1, 2), ymd(2020, 12, 31)).unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub.latest().unwrap().rating, 1550.0);
    }

    #[test]
    fn test_slice_is_idempotent() {
        let s = sample();
        let (from, to) = (ymd(2020, 3, 1), ymd(2021, 6, 1));
        let once = s.slice(from, to).unwrap();
        let twice = once.slice(from, to).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_slice_empty_range() {
        let s = sample();
        let err = s.slice(ymd(2020, 2, 1), ymd(2020, 3, 1)).unwrap_err();
        assert_eq!(err.errcode, ErrCode::EmptyRange);
        let err = s.slice(ymd(2021, 1, 1), ymd(2020, 1, 1)).unwrap_err();
        assert_eq!(err.errcode, ErrCode::EmptyRange);
    }

    #[test]
    fn test_since() {
        let s = sample();
        assert_eq!(s.since(ymd(2020, 6, 1)).unwrap().len(), 2);
        assert_eq!(s.since(ymd(2021, 1, 2)).unwrap_err().errcode, ErrCode::EmptyRange);
    }

    #[test]
    fn test_neighbour_lookups() {
        let s = sample();
        assert_eq!(s.last_on_or_before(ymd(2020, 5, 31)).unwrap().rating, 1500.0);
        assert_eq!(s.last_on_or_before(ymd(2020, 6, 1)).unwrap().rating, 1550.0);
        assert!(s.last_on_or_before(ymd(2019, 12, 31)).is_none());
        assert_eq!(s.first_on_or_after(ymd(2020, 1, 2)).unwrap().rating, 1550.0);
        assert!(s.first_on_or_after(ymd(2021, 1, 2)).is_none());
    }
}
