//! Demo data set: a handful of users, profiles, jobs, a market and reviews
//! around Gurugram.
//!
//! Loaded through [`MarketplaceService`] so every record passes the same
//! checks as API traffic. Intended for an empty repository; ids below
//! assume the first user gets id 1.

use chrono::{Duration, Utc};

use crate::domain::{
    Availability, Coordinate, JobId, MarketItem, NewJob, NewMarket, NewReview, NewUser,
    NewWorkerProfile, Role, UserId,
};
use crate::error::GatewayError;
use crate::service::MarketplaceService;

struct DemoUser {
    username: &'static str,
    name: &'static str,
    role: Role,
    picture: &'static str,
    location: Coordinate,
    address: &'static str,
}

const USERS: [DemoUser; 5] = [
    DemoUser {
        username: "ahmed123",
        name: "Ahmed Khan",
        role: Role::Employer,
        picture: "https://randomuser.me/api/portraits/men/1.jpg",
        location: Coordinate::new(28.4595, 77.0266),
        address: "Sector 15, Gurugram",
    },
    DemoUser {
        username: "hamid456",
        name: "Hamid Khan",
        role: Role::Worker,
        picture: "https://randomuser.me/api/portraits/men/2.jpg",
        location: Coordinate::new(28.4605, 77.0276),
        address: "Sector 16, Gurugram",
    },
    DemoUser {
        username: "raj789",
        name: "Raj Kumar",
        role: Role::Worker,
        picture: "https://randomuser.me/api/portraits/men/3.jpg",
        location: Coordinate::new(28.4615, 77.0286),
        address: "Sector 17, Gurugram",
    },
    DemoUser {
        username: "ananya234",
        name: "Ananya Sharma",
        role: Role::Employer,
        picture: "https://randomuser.me/api/portraits/women/1.jpg",
        location: Coordinate::new(28.4625, 77.0296),
        address: "Sector 18, Gurugram",
    },
    DemoUser {
        username: "vikram567",
        name: "Vikram Malhotra",
        role: Role::Employer,
        picture: "https://randomuser.me/api/portraits/men/4.jpg",
        location: Coordinate::new(28.4635, 77.0306),
        address: "BTM Layout, Bangalore",
    },
];

/// Populates the repository behind `service` with the demo data set.
///
/// # Errors
///
/// Returns the first [`GatewayError`] raised while inserting, e.g.
/// [`GatewayError::AlreadyExists`] when the demo users are already present.
pub async fn seed_demo_data(service: &MarketplaceService) -> Result<(), GatewayError> {
    for (index, demo) in USERS.iter().enumerate() {
        service
            .register_user(NewUser {
                username: demo.username.to_string(),
                name: demo.name.to_string(),
                email: format!("{}@example.com", demo.username),
                phone: format!("+91123456789{index}"),
                role: demo.role,
                profile_picture: Some(demo.picture.to_string()),
                location: Some(demo.location),
                address: Some(demo.address.to_string()),
            })
            .await?;
    }

    service
        .create_worker_profile(NewWorkerProfile {
            user_id: UserId::new(2),
            profession: "Plumber".to_string(),
            experience: 5,
            hourly_rate: Some(50_000),
            daily_rate: Some(300_000),
            availability: Availability::Available,
            bio: Some(
                "Experienced plumber with expertise in residential and commercial plumbing systems."
                    .to_string(),
            ),
            skills: strings(&["Pipe Fitting", "Leak Repair", "Fixture Installation"]),
        })
        .await?;

    service
        .create_worker_profile(NewWorkerProfile {
            user_id: UserId::new(3),
            profession: "Electrician".to_string(),
            experience: 7,
            hourly_rate: Some(60_000),
            daily_rate: Some(350_000),
            availability: Availability::Available,
            bio: Some(
                "Certified electrician with 7 years of experience in wiring, installations, and repairs."
                    .to_string(),
            ),
            skills: strings(&["Wiring", "Circuit Repair", "Lighting Installation"]),
        })
        .await?;

    let now = Utc::now();
    service
        .post_job(NewJob {
            title: "Bathroom Plumbing Repair".to_string(),
            description:
                "Need to fix leaking sink and shower in apartment bathroom. Urgent work required."
                    .to_string(),
            category: "Plumbing".to_string(),
            budget: Some(100_000),
            location: Some(Coordinate::new(28.4595, 77.0266)),
            address: "Sector 18, Gurugram".to_string(),
            employer_id: UserId::new(4),
            scheduled_for: Some(now + Duration::days(1)),
        })
        .await?;

    service
        .post_job(NewJob {
            title: "House Painting - Two Rooms".to_string(),
            description: "Looking for an experienced painter to paint two bedrooms. Light colors, materials provided."
                .to_string(),
            category: "Painting".to_string(),
            budget: Some(250_000),
            location: Some(Coordinate::new(28.4635, 77.0306)),
            address: "BTM Layout, Bangalore".to_string(),
            employer_id: UserId::new(5),
            scheduled_for: Some(now + Duration::days(2)),
        })
        .await?;

    service
        .create_market(NewMarket {
            name: "Sharma Hardware Store".to_string(),
            description: Some(
                "Hardware, plumbing supplies, paints, tools, electrical items".to_string(),
            ),
            market_type: "Hardware".to_string(),
            location: Some(Coordinate::new(28.4645, 77.0316)),
            address: "Sector 19, Gurugram".to_string(),
            phone: Some("+911234567895".to_string()),
            items: vec![
                item("PVC Pipe (1 inch)", 15_000),
                item("Water Tap", 35_000),
                item("Wire (1 meter)", 5_000),
            ],
        })
        .await;

    service
        .create_review(NewReview {
            user_id: UserId::new(1),
            target_id: UserId::new(2),
            job_id: Some(JobId::new(1)),
            rating: 5,
            comment: Some("Excellent work, very professional!".to_string()),
        })
        .await?;

    service
        .create_review(NewReview {
            user_id: UserId::new(4),
            target_id: UserId::new(3),
            job_id: Some(JobId::new(2)),
            rating: 4,
            comment: Some("Good work, but took a bit longer than expected.".to_string()),
        })
        .await?;

    tracing::info!(users = USERS.len(), "demo data seeded");
    Ok(())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn item(name: &str, price: i64) -> MarketItem {
    MarketItem {
        name: name.to_string(),
        price,
        description: None,
    }
}
