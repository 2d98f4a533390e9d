//! Parsers for MovieLens data files.
//!
//! Two on-disk layouts are supported:
//! - MovieLens "small" / "latest" CSV files:
//!   - movies.csv: movieId,title,genres
//!   - ratings.csv: userId,movieId,rating,timestamp
//! - MovieLens 1M `::`-separated files (ISO-8859-1):
//!   - movies.dat: movieId::title::genres
//!   - ratings.dat: userId::movieId::rating::timestamp

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

// =============================================================================
// CSV layout
// =============================================================================

#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    title: String,
    genres: String,
}

#[derive(Debug, Deserialize)]
struct RatingRecord {
    #[serde(rename = "userId")]
    user_id: UserId,
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    rating: f32,
    #[serde(default)]
    timestamp: Option<i64>,
}

/// Parse a movies.csv file
///
/// Titles containing commas are quoted in the file; the CSV reader
/// takes care of that.
pub fn parse_movies_csv(path: &Path) -> Result<Vec<Movie>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut movies = Vec::new();

    for (idx, result) in reader.deserialize::<MovieRecord>().enumerate() {
        // Header is line 1
        let line_no = idx + 2;
        let record = result.map_err(|e| DataLoadError::ParseError {
            file: "movies.csv".to_string(),
            line: line_no,
            reason: e.to_string(),
        })?;

        movies.push(Movie {
            id: record.movie_id,
            year: split_title_year(&record.title).1,
            genres: parse_genres(&record.genres),
            title: record.title,
        });
    }

    Ok(movies)
}

/// Parse a ratings.csv file
pub fn parse_ratings_csv(path: &Path) -> Result<Vec<Rating>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut ratings = Vec::new();

    for (idx, result) in reader.deserialize::<RatingRecord>().enumerate() {
        let line_no = idx + 2;
        let record = result.map_err(|e| DataLoadError::ParseError {
            file: "ratings.csv".to_string(),
            line: line_no,
            reason: e.to_string(),
        })?;

        ratings.push(Rating {
            user_id: record.user_id,
            movie_id: record.movie_id,
            rating: validate_rating(record.rating)?,
            timestamp: record.timestamp,
        });
    }

    Ok(ratings)
}

// =============================================================================
// `::` layout
// =============================================================================

/// Read a file with ISO-8859-1 encoding (Latin-1)
///
/// Each byte maps directly to the Unicode code point of the same value.
fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content: String = bytes.iter().map(|&b| b as char).collect();

    Ok(content.lines().map(|s| s.to_string()).collect())
}

fn next_field<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    file: &str,
    line: usize,
    name: &str,
) -> Result<&'a str> {
    parts.next().ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Missing {}", name),
    })
}

fn parse_field<T>(value: &str, file: &str, line: usize, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {}: {}", name, e),
    })
}

/// Parse the movies.dat file
///
/// Format: movieId::title::genres
pub fn parse_movies_dat(path: &Path) -> Result<Vec<Movie>> {
    const FILE: &str = "movies.dat";
    let lines = read_lines_latin1(path)?;
    let mut movies = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.split("::");
        let movie_id = next_field(&mut parts, FILE, line_no, "movieId")?;
        let title = next_field(&mut parts, FILE, line_no, "title")?;
        let genres = next_field(&mut parts, FILE, line_no, "genres")?;

        movies.push(Movie {
            id: parse_field(movie_id, FILE, line_no, "movieId")?,
            title: title.to_string(),
            year: split_title_year(title).1,
            genres: parse_genres(genres),
        });
    }

    Ok(movies)
}

/// Parse the ratings.dat file
///
/// Format: userId::movieId::rating::timestamp
pub fn parse_ratings_dat(path: &Path) -> Result<Vec<Rating>> {
    const FILE: &str = "ratings.dat";
    let lines = read_lines_latin1(path)?;
    let mut ratings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.split("::");
        let user_id = next_field(&mut parts, FILE, line_no, "userId")?;
        let movie_id = next_field(&mut parts, FILE, line_no, "movieId")?;
        let rating = next_field(&mut parts, FILE, line_no, "rating")?;
        let timestamp = next_field(&mut parts, FILE, line_no, "timestamp")?;

        ratings.push(Rating {
            user_id: parse_field(user_id, FILE, line_no, "userId")?,
            movie_id: parse_field(movie_id, FILE, line_no, "movieId")?,
            rating: validate_rating(parse_field(rating, FILE, line_no, "rating")?)?,
            timestamp: Some(parse_field(timestamp, FILE, line_no, "timestamp")?),
        });
    }

    Ok(ratings)
}

// =============================================================================
// Shared field handling
// =============================================================================

/// Reject ratings the similarity computation cannot use.
///
/// The core relies on ratings being non-negative so cosine scores stay in [0, 1].
fn validate_rating(rating: f32) -> Result<f32> {
    if rating.is_finite() && rating >= 0.0 {
        Ok(rating)
    } else {
        Err(DataLoadError::InvalidValue {
            field: "rating".to_string(),
            value: rating.to_string(),
        })
    }
}

/// Parse a genre string into Genre enum
///
/// Example: "Action" -> Ok(Genre::Action)
///          "Sci-Fi" -> Ok(Genre::SciFi)
fn parse_genre(s: &str) -> Result<Genre> {
    match s {
        "Action" => Ok(Genre::Action),
        "Adventure" => Ok(Genre::Adventure),
        "Animation" => Ok(Genre::Animation),
        // 1M spells it "Children's", the CSV releases "Children"
        "Children" | "Children's" => Ok(Genre::Children),
        "Comedy" => Ok(Genre::Comedy),
        "Crime" => Ok(Genre::Crime),
        "Documentary" => Ok(Genre::Documentary),
        "Drama" => Ok(Genre::Drama),
        "Fantasy" => Ok(Genre::Fantasy),
        "Film-Noir" => Ok(Genre::FilmNoir),
        "Horror" => Ok(Genre::Horror),
        "IMAX" => Ok(Genre::Imax),
        "Musical" => Ok(Genre::Musical),
        "Mystery" => Ok(Genre::Mystery),
        "Romance" => Ok(Genre::Romance),
        "Sci-Fi" => Ok(Genre::SciFi),
        "Thriller" => Ok(Genre::Thriller),
        "War" => Ok(Genre::War),
        "Western" => Ok(Genre::Western),
        _ => Err(DataLoadError::InvalidValue {
            field: "genre".to_string(),
            value: s.to_string(),
        }),
    }
}

/// Parse pipe-separated genres
///
/// Example: "Action|Adventure|Sci-Fi" -> vec![Genre::Action, Genre::Adventure, Genre::SciFi]
/// Genres outside the known vocabulary are skipped rather than failing the load.
fn parse_genres(s: &str) -> Vec<Genre> {
    let s = s.trim();
    if s.is_empty() || s == "(no genres listed)" {
        return Vec::new();
    }
    s.split('|')
        .filter_map(|name| match parse_genre(name) {
            Ok(genre) => Some(genre),
            Err(_) => {
                debug!("Skipping unknown genre '{}'", name);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_genre() {
        assert!(matches!(parse_genre("Action").unwrap(), Genre::Action));
        assert!(matches!(parse_genre("Children's").unwrap(), Genre::Children));
        assert!(parse_genre("Polka").is_err());
    }

    #[test]
    fn test_parse_genres_empty_marker() {
        assert!(parse_genres("(no genres listed)").is_empty());
        assert_eq!(parse_genres("IMAX|Sci-Fi"), vec![Genre::Imax, Genre::SciFi]);
    }

    #[test]
    fn test_unknown_genre_is_skipped() {
        assert_eq!(parse_genres("Polka|Drama"), vec![Genre::Drama]);

        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "movieId,title,genres").unwrap();
        writeln!(file, "1,Heat (1995),Action|Crime|Heist").unwrap();
        writeln!(file, "2,Fargo (1996),Polka").unwrap();

        let movies = parse_movies_csv(file.path()).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].genres, vec![Genre::Action, Genre::Crime]);
        assert!(movies[1].genres.is_empty());
    }

    #[test]
    fn test_parse_movies_csv_quoted_title() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "movieId,title,genres").unwrap();
        writeln!(file, "1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy").unwrap();
        writeln!(file, "11,\"American President, The (1995)\",Comedy|Drama|Romance").unwrap();

        let movies = parse_movies_csv(file.path()).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].title, "American President, The (1995)");
        assert_eq!(movies[1].year, Some(1995));
        assert_eq!(movies[0].genres.len(), 5);
    }

    #[test]
    fn test_parse_ratings_csv() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "userId,movieId,rating,timestamp").unwrap();
        writeln!(file, "1,1,4.0,964982703").unwrap();
        writeln!(file, "1,3,4.5,964981247").unwrap();

        let ratings = parse_ratings_csv(file.path()).unwrap();

        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].movie_id, 3);
        assert_eq!(ratings[1].rating, 4.5);
        assert_eq!(ratings[0].timestamp, Some(964982703));
    }

    #[test]
    fn test_parse_ratings_csv_without_timestamp_column() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "userId,movieId,rating").unwrap();
        writeln!(file, "7,42,3.5").unwrap();

        let ratings = parse_ratings_csv(file.path()).unwrap();

        assert_eq!(ratings, vec![Rating::new(7, 42, 3.5)]);
    }

    #[test]
    fn test_parse_ratings_csv_reports_line() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "userId,movieId,rating,timestamp").unwrap();
        writeln!(file, "1,1,4.0,964982703").unwrap();
        writeln!(file, "1,abc,4.0,964982703").unwrap();

        match parse_ratings_csv(file.path()) {
            Err(DataLoadError::ParseError { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rating_rejected() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "1::1193::-5::978300760").unwrap();

        assert!(matches!(
            parse_ratings_dat(file.path()),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_dat_files() {
        let mut movies_file = NamedTempFile::new().expect("temp file");
        writeln!(movies_file, "1::Toy Story (1995)::Animation|Children's|Comedy").unwrap();
        writeln!(movies_file).unwrap();
        writeln!(movies_file, "2::Jumanji (1995)::Adventure|Children's|Fantasy").unwrap();

        let mut ratings_file = NamedTempFile::new().expect("temp file");
        writeln!(ratings_file, "1::1::5::978300760").unwrap();
        writeln!(ratings_file, "2::1::3::978302109").unwrap();

        let movies = parse_movies_dat(movies_file.path()).unwrap();
        let ratings = parse_ratings_dat(ratings_file.path()).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].title, "Jumanji (1995)");
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].rating, 3.0);
    }

    #[test]
    fn test_dat_missing_field() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "1::1193::5").unwrap();

        match parse_ratings_dat(file.path()) {
            Err(DataLoadError::ParseError { reason, line, .. }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("timestamp"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
