mod util;

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{TimeDelta, Utc};
use clap::Parser;
use common::Error;
use fake::Fake;
use fake::faker::internet::raw::Username;
use fake::faker::lorem::raw::Sentence;
use fake::faker::name::raw::Name;
use fake::locales::EN;
use models::{
	Booking,
	BookingKind,
	BookingStatus,
	BookingStatusEvent,
	Equipment,
	Room,
	Seeder,
	User,
	UserRole,
};
use rand::seq::IndexedRandom;
use rand::{Rng, rng};
use store::Store;

use crate::util::generate_unique_set;

/// Password shared by every generated account
const FAKE_PASSWORD: &str = "password123";

const STATUSES: [BookingStatus; 6] = [
	BookingStatus::Pending,
	BookingStatus::Approved,
	BookingStatus::Rejected,
	BookingStatus::Active,
	BookingStatus::Completed,
	BookingStatus::Cancelled,
];

#[derive(Parser, Debug)]
struct Opt {
	#[arg(long, env = "STORE_URL", default_value = "redis://127.0.0.1:6379")]
	store_url: String,
	#[arg(long, env = "SEED_DIR", default_value = "seed")]
	seed_dir:  PathBuf,
	/// Overwrite collections that already exist
	#[arg(long, short = 'f')]
	force:     bool,
	#[arg(long, short = 'u', default_value_t = 0)]
	users:     usize,
	#[arg(long, short = 'b', default_value_t = 0)]
	bookings:  usize,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let cli = Opt::parse();
	let store = Store::connect(&cli.store_url).await?;

	let seeded = Seeder::new(&cli.seed_dir, &store).populate(cli.force).await?;
	println!("Seeded {} collections from {}", seeded.len(), cli.seed_dir.display());

	if cli.users > 0 {
		println!("Seeding {} users…", cli.users);
		let inserted = seed_users(&store, cli.users).await?;
		println!("Inserted {inserted} unique users");
	}

	if cli.bookings > 0 {
		println!("Seeding {} bookings…", cli.bookings);
		let inserted = seed_bookings(&store, cli.bookings).await?;
		println!("Inserted {inserted} bookings");
	}

	Ok(())
}

/// Append users with unique emails, all sharing [`FAKE_PASSWORD`]
async fn seed_users(store: &Store, count: usize) -> Result<usize, Error> {
	let password_hash = User::hash_password(FAKE_PASSWORD)?;

	let _guard = store.write().await;

	let mut users: Vec<User> = store.load().await?;

	let taken: HashSet<String> = users
		.iter()
		.filter_map(|u| u.email.split('@').next())
		.map(str::to_lowercase)
		.collect();
	let handles =
		generate_unique_set(count, &taken, || Username(EN).fake::<String>());

	let now = Utc::now();
	let mut rng = rng();

	let offset = users.len();
	users.extend(handles.into_iter().enumerate().map(|(i, handle)| {
		User {
			id: format!("user-fake-{}", offset + i),
			name: Name(EN).fake(),
			email: format!("{handle}@campus.ac.id"),
			role: UserRole::User,
			is_active: rng.random_bool(0.95),
			created_at: now - TimeDelta::days(rng.random_range(0..365)),
			password_hash: password_hash.clone(),
		}
	}));

	store.save(&users).await?;

	Ok(count)
}

/// Append bookings by random users for random rooms and equipment
async fn seed_bookings(store: &Store, count: usize) -> Result<usize, Error> {
	let _guard = store.write().await;

	let all_users: Vec<User> = store.load().await?;
	let rooms: Vec<Room> = store.load().await?;
	let equipment: Vec<Equipment> = store.load().await?;
	let mut bookings: Vec<Booking> = store.load().await?;

	let admin_id = all_users.iter().find(|u| u.is_admin()).map(|a| a.id.clone());
	let users: Vec<&User> = all_users.iter().filter(|u| !u.is_admin()).collect();

	assert!(!users.is_empty(), "No users exist to make bookings");
	assert!(
		!rooms.is_empty() || !equipment.is_empty(),
		"No rooms or equipment exist to book"
	);

	let now = Utc::now();
	let mut rng = rng();

	let offset = bookings.len();
	for i in 0..count {
		let Some(user) = users.choose(&mut rng) else {
			break;
		};

		let pick_room =
			equipment.is_empty() || (!rooms.is_empty() && rng.random_bool(0.5));
		let (kind, item_id, item_name) = if pick_room {
			let Some(room) = rooms.choose(&mut rng) else {
				break;
			};
			(BookingKind::Room, room.id.clone(), room.name.clone())
		} else {
			let Some(item) = equipment.choose(&mut rng) else {
				break;
			};
			(BookingKind::Equipment, item.id.clone(), item.name.clone())
		};

		let created_at = now - TimeDelta::hours(rng.random_range(24..24 * 60));
		let start_date = created_at + TimeDelta::hours(rng.random_range(24..24 * 14));
		let end_date = start_date + TimeDelta::hours(rng.random_range(1..9));

		let status = *STATUSES.choose(&mut rng).unwrap_or(&BookingStatus::Pending);

		let mut timeline = vec![BookingStatusEvent {
			status:    BookingStatus::Pending,
			timestamp: created_at,
			by:        Some(user.id.clone()),
			notes:     None,
		}];
		if status != BookingStatus::Pending {
			timeline.push(BookingStatusEvent {
				status,
				timestamp: created_at + TimeDelta::hours(12),
				by: admin_id.clone(),
				notes: None,
			});
		}

		let approved = matches!(
			status,
			BookingStatus::Approved | BookingStatus::Active | BookingStatus::Completed
		);

		bookings.push(Booking {
			id: format!("booking-fake-{}", offset + i),
			user_id: user.id.clone(),
			user_name: user.name.clone(),
			kind,
			item_id,
			item_name,
			start_date,
			end_date,
			purpose: Sentence(EN, 4..10).fake(),
			notes: None,
			status,
			approved_by: admin_id.clone().filter(|_| approved),
			approved_at: approved.then(|| created_at + TimeDelta::hours(12)),
			rejection_reason: (status == BookingStatus::Rejected)
				.then(|| Sentence(EN, 3..6).fake()),
			created_at,
			timeline,
		});
	}

	let inserted = bookings.len() - offset;

	store.save(&bookings).await?;

	Ok(inserted)
}
