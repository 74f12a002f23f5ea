//! Review recording and rating aggregation.
//!
//! A user's rating is the arithmetic mean of every review targeting them,
//! recomputed in full whenever a review is added. [`record_review`] runs
//! against write-locked [`Tables`], so the insert and the recomputation
//! are one atomic step with respect to other reviews.

use crate::domain::{NewReview, Review, Tables, UserId};
use crate::error::GatewayError;

/// Mean of the ratings in `reviews`, or `None` when there are none.
pub fn average_rating<'a, I>(reviews: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Review>,
{
    let (sum, count) = reviews
        .into_iter()
        .fold((0_i64, 0_u32), |(sum, count), review| {
            (sum + i64::from(review.rating), count + 1)
        });
    if count == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = sum as f64 / f64::from(count);
    Some(mean)
}

/// Stores `new` and refreshes the target user's average rating.
///
/// Ratings are taken as given; values outside 1–5 are not rejected.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the reviewer, the target, or the
/// referenced job does not exist. Nothing is written in that case.
pub fn record_review(tables: &mut Tables, new: NewReview) -> Result<Review, GatewayError> {
    tables.users.require(new.user_id)?;
    tables.users.require(new.target_id)?;
    if let Some(job_id) = new.job_id {
        tables.jobs.require(job_id)?;
    }

    let target_id = new.target_id;
    let review = tables.reviews.insert_with(|id| new.into_review(id)).clone();
    let rating = refresh_rating(tables, target_id)?;

    tracing::info!(
        review_id = %review.id,
        target_id = %target_id,
        rating,
        "review recorded"
    );
    Ok(review)
}

/// Recomputes and stores the average rating of `target_id`.
fn refresh_rating(tables: &mut Tables, target_id: UserId) -> Result<f64, GatewayError> {
    let rating = average_rating(tables.reviews_for(target_id)).unwrap_or(0.0);
    tables.users.update(target_id, |user| {
        user.rating = rating;
        Ok(())
    })?;
    Ok(rating)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{JobId, NewUser, Role};

    fn add_user(tables: &mut Tables, username: &str) -> UserId {
        tables
            .users
            .insert_with(|id| {
                NewUser {
                    username: username.to_string(),
                    name: username.to_string(),
                    email: format!("{username}@example.com"),
                    phone: "+910000000000".to_string(),
                    role: Role::Worker,
                    profile_picture: None,
                    location: None,
                    address: None,
                }
                .into_user(id)
            })
            .id
    }

    fn review(user_id: UserId, target_id: UserId, rating: i32) -> NewReview {
        NewReview {
            user_id,
            target_id,
            job_id: None,
            rating,
            comment: None,
        }
    }

    fn rating_of(tables: &Tables, id: UserId) -> f64 {
        tables.users.get(id).map_or(f64::NAN, |user| user.rating)
    }

    #[test]
    fn average_of_nothing_is_none() {
        assert_eq!(average_rating(std::iter::empty()), None);
    }

    #[test]
    fn rating_is_mean_in_either_order() {
        for ratings in [[5, 4], [4, 5]] {
            let mut tables = Tables::new();
            let reviewer = add_user(&mut tables, "ahmed");
            let target = add_user(&mut tables, "hamid");
            for rating in ratings {
                let Ok(_) = record_review(&mut tables, review(reviewer, target, rating)) else {
                    panic!("review should be recorded");
                };
            }
            assert_eq!(rating_of(&tables, target), 4.5);
        }
    }

    #[test]
    fn first_review_sets_rating_directly() {
        let mut tables = Tables::new();
        let reviewer = add_user(&mut tables, "ahmed");
        let target = add_user(&mut tables, "hamid");
        let Ok(stored) = record_review(&mut tables, review(reviewer, target, 3)) else {
            panic!("review should be recorded");
        };
        assert_eq!(stored.target_id, target);
        assert_eq!(rating_of(&tables, target), 3.0);
        assert_eq!(rating_of(&tables, reviewer), 0.0);
    }

    #[test]
    fn unknown_target_fails_without_mutation() {
        let mut tables = Tables::new();
        let reviewer = add_user(&mut tables, "ahmed");

        let result = record_review(&mut tables, review(reviewer, UserId::new(9999), 5));
        assert!(matches!(result, Err(GatewayError::NotFound { id: 9999, .. })));
        assert!(tables.reviews.is_empty());
        assert_eq!(rating_of(&tables, reviewer), 0.0);
    }

    #[test]
    fn unknown_reviewer_or_job_is_rejected() {
        let mut tables = Tables::new();
        let target = add_user(&mut tables, "hamid");

        let by_ghost = record_review(&mut tables, review(UserId::new(42), target, 5));
        assert!(matches!(by_ghost, Err(GatewayError::NotFound { id: 42, .. })));

        let mut with_job = review(target, target, 5);
        with_job.job_id = Some(JobId::new(7));
        let result = record_review(&mut tables, with_job);
        assert!(matches!(result, Err(GatewayError::NotFound { id: 7, .. })));
        assert!(tables.reviews.is_empty());
    }

    #[test]
    fn out_of_range_ratings_are_kept() {
        let mut tables = Tables::new();
        let reviewer = add_user(&mut tables, "ahmed");
        let target = add_user(&mut tables, "hamid");
        let Ok(_) = record_review(&mut tables, review(reviewer, target, 9)) else {
            panic!("review should be recorded");
        };
        assert_eq!(rating_of(&tables, target), 9.0);
    }
}
