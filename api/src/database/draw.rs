use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::schedule;

/// Number of winning numbers in the first prize.
pub const FIRST_PRIZE_NUMBERS: usize = 6;

/// Second prizes are submitted in groups of this size.
pub const SECOND_PRIZE_GROUP: usize = 3;

/// Digits in a single winning number.
pub const NUMBER_DIGITS: usize = 4;

/// Second prizes are displayed in rows of this width.
pub const DISPLAY_ROW_WIDTH: usize = 4;

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Draw {
    /// The unique identifier for the draw.
    pub id: i64,
    /// The time the numbers were published.
    pub date: DateTime<Utc>,
    /// The first prize winning numbers.
    pub first_prize: Vec<String>,
    /// The second prize winning numbers.
    pub second_prizes: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error("no draw recorded for {0}")]
    NotFound(NaiveDate),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

fn is_winning_number(value: &str) -> bool {
    value.len() == NUMBER_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
}

impl Draw {
    pub fn validate_first_prize(numbers: &[String]) -> Result<(), &'static str> {
        if numbers.len() != FIRST_PRIZE_NUMBERS
            || !numbers.iter().all(|n| is_winning_number(n))
        {
            return Err("Invalid first prize numbers");
        }

        Ok(())
    }

    pub fn validate_second_prizes(numbers: &[String]) -> Result<(), &'static str> {
        if numbers.is_empty()
            || numbers.len() % SECOND_PRIZE_GROUP != 0
            || !numbers.iter().all(|n| is_winning_number(n))
        {
            return Err("Invalid second prize numbers");
        }

        Ok(())
    }

    /// The second prizes chunked into display rows.
    pub fn second_prize_rows(&self) -> Vec<&[String]> {
        self.second_prizes.chunks(DISPLAY_ROW_WIDTH).collect()
    }

    /// The most recently published draw.
    pub async fn latest(db: &PgPool) -> sqlx::Result<Option<Draw>> {
        sqlx::query_as::<_, Draw>("SELECT * FROM draws ORDER BY date DESC LIMIT 1")
            .fetch_optional(db)
            .await
    }

    /// Every published draw, newest first.
    pub async fn all(db: &PgPool) -> sqlx::Result<Vec<Draw>> {
        sqlx::query_as::<_, Draw>("SELECT * FROM draws ORDER BY date DESC")
            .fetch_all(db)
            .await
    }

    /// Validates both number sequences and publishes a new draw stamped
    /// with the current time. Nothing is persisted on a validation error.
    pub async fn create(
        db: &PgPool,
        first_prize: Vec<String>,
        second_prizes: Vec<String>,
    ) -> Result<Draw, DrawError> {
        Self::validate_first_prize(&first_prize).map_err(DrawError::Invalid)?;
        Self::validate_second_prizes(&second_prizes).map_err(DrawError::Invalid)?;

        let draw = sqlx::query_as::<_, Draw>(
            "INSERT INTO draws (date, first_prize, second_prizes) VALUES (NOW(), $1, $2) RETURNING *",
        )
        .bind(&first_prize)
        .bind(&second_prizes)
        .fetch_one(db)
        .await?;

        Ok(draw)
    }

    /// Deletes the draw published on the given calendar date in the draw
    /// time zone. At most one record is removed.
    pub async fn delete_by_date(db: &PgPool, date: NaiveDate) -> Result<(), DrawError> {
        let result = sqlx::query(
            "DELETE FROM draws WHERE id = (
                SELECT id FROM draws WHERE (date AT TIME ZONE $2)::date = $1
                ORDER BY date DESC LIMIT 1
            )",
        )
        .bind(date)
        .bind(schedule::DRAW_TIME_ZONE.name())
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DrawError::NotFound(date));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_validate_first_prize() {
        assert!(Draw::validate_first_prize(&numbers(&[
            "0042", "1234", "5678", "9012", "3456", "7890"
        ]))
        .is_ok());

        // Wrong sequence length.
        assert!(Draw::validate_first_prize(&numbers(&["0042", "1234"])).is_err());
        assert!(Draw::validate_first_prize(&[]).is_err());

        // Wrong digit width.
        assert!(Draw::validate_first_prize(&numbers(&[
            "042", "1234", "5678", "9012", "3456", "7890"
        ]))
        .is_err());

        // Not numeric.
        assert!(Draw::validate_first_prize(&numbers(&[
            "00a2", "1234", "5678", "9012", "3456", "7890"
        ]))
        .is_err());
    }

    #[test]
    fn test_validate_second_prizes() {
        assert!(Draw::validate_second_prizes(&numbers(&["1111", "2222", "3333"])).is_ok());
        assert!(Draw::validate_second_prizes(&numbers(&[
            "1111", "2222", "3333", "4444", "5555", "6666"
        ]))
        .is_ok());

        // Not a multiple of the group size.
        assert!(Draw::validate_second_prizes(&numbers(&["1111", "2222"])).is_err());
        assert!(Draw::validate_second_prizes(&[]).is_err());

        // Bad number format.
        assert!(Draw::validate_second_prizes(&numbers(&["1111", "2222", "33c3"])).is_err());
    }

    #[test]
    fn test_second_prize_rows() {
        let draw = Draw {
            second_prizes: numbers(&["1111", "2222", "3333", "4444", "5555", "6666"]),
            ..Default::default()
        };

        let rows = draw.second_prize_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], numbers(&["1111", "2222", "3333", "4444"]));
        assert_eq!(rows[1], numbers(&["5555", "6666"]));

        assert!(Draw::default().second_prize_rows().is_empty());
    }
}
