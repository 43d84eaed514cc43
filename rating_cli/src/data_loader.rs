use rating_core::common::time::parse_date;
use rating_core::{DuplicatePolicy, RatingPoint, RatingSeriesStore};
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One CSV row. Accepts `team,date,rating` files and ClubElo exports
/// (`Rank,Club,Country,Level,Elo,From,To`), extra columns are ignored
#[derive(Debug, Deserialize)]
struct RatingRecord {
    #[serde(alias = "Club", alias = "club", alias = "Team")]
    team: String,
    #[serde(alias = "From", alias = "from", alias = "Date")]
    date: String,
    #[serde(alias = "Elo", alias = "elo", alias = "Rating")]
    rating: f64,
}

/// Load every team found under `path`, a CSV file or a directory of CSV files.
/// Teams keep the order in which they first appear
pub fn load_stores(path: &Path) -> Result<Vec<RatingSeriesStore>, Box<dyn Error>> {
    let mut rows = Vec::new();
    for file in csv_files(path)? {
        info!(file = %file.display(), "reading ratings");
        rows.extend(read_rows(File::open(&file)?)?);
    }
    Ok(build_stores(rows))
}

fn csv_files(path: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.extension().and_then(|s| s.to_str()) == Some("csv") {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse (team, point) rows from CSV with a header line
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<(String, RatingPoint)>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let record: RatingRecord = result?;
        let date = parse_date(&record.date)?;
        rows.push((record.team.trim().to_string(), RatingPoint::new(date, record.rating)));
    }

    Ok(rows)
}

/// Group rows by team; a team whose rows are invalid is skipped with a warning
pub fn build_stores(rows: Vec<(String, RatingPoint)>) -> Vec<RatingSeriesStore> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<RatingPoint>> = HashMap::new();

    for (team, point) in rows {
        grouped
            .entry(team.clone())
            .or_insert_with(|| {
                order.push(team);
                Vec::new()
            })
            .push(point);
    }

    order
        .into_iter()
        .filter_map(|team| {
            let points = grouped.remove(&team).unwrap_or_default();
            match RatingSeriesStore::from_unsorted(team.as_str(), points, DuplicatePolicy::KeepLast) {
                Ok(store) => Some(store),
                Err(error) => {
                    warn!(team = team.as_str(), %error, "skipping team");
                    None
                }
            }
        })
        .collect()
}
