// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Gate and listing service running over the SQLite repositories.

use std::sync::Arc;

use chrono::Utc;
use realty_server_auth::testing::sign_token;
use realty_server_auth::{
	AuthConfig, AuthDecision, AuthorizationGate, Caller, Claims, DenialReason, ListingId,
	Operation, OperationRegistry, Role, UserId,
};
use realty_server_db::testing::create_test_pool;
use realty_server_db::{ListingRepository, NewListing, UserRepository};
use realty_server_listings::{build_filter, ListingError, ListingService, PropertyType};

const SECRET: &str = "integration-secret";

struct World {
	gate: AuthorizationGate,
	service: ListingService,
	users: UserRepository,
	realtor: UserId,
	buyer: UserId,
	listing: ListingId,
}

async fn world() -> World {
	let pool = create_test_pool().await;
	let users = UserRepository::new(pool.clone());
	let listings = Arc::new(ListingRepository::new(pool));

	let realtor = users.create_user("Laith", None, Role::Realtor).await.unwrap();
	let buyer = users.create_user("Mira", None, Role::Buyer).await.unwrap();
	let listing = listings
		.create_listing(&NewListing {
			address: "1234 Al-Souq".to_string(),
			city: "Yabroud".to_string(),
			price: 1_500_000.0,
			property_type: PropertyType::Residential,
			bedrooms: 4,
			bathrooms: 2.0,
			realtor_id: realtor,
			images: vec!["front.jpg".to_string()],
		})
		.await
		.unwrap();

	let gate = AuthorizationGate::from_config(
		&AuthConfig::new(SECRET),
		Arc::new(users.clone()),
		listings.clone(),
		Arc::new(OperationRegistry::listing_defaults()),
	);

	World {
		gate,
		service: ListingService::new(listings),
		users,
		realtor,
		buyer,
		listing,
	}
}

fn token_for(id: UserId) -> String {
	let now = Utc::now().timestamp();
	sign_token(
		&Claims {
			id,
			name: "test".to_string(),
			iat: now,
			exp: now + 3600,
		},
		SECRET,
	)
}

#[tokio::test]
async fn anonymous_search_reaches_the_database() {
	let w = world().await;
	let decision = w.gate.authorize(None, Operation::ListListings, None).await.unwrap();
	assert_eq!(decision, AuthDecision::Allowed(Caller::Anonymous));

	let found = w
		.service
		.list_listings(&build_filter(Some("Yabroud"), Some("1000000"), None, Some("RESIDENTIAL")))
		.await
		.unwrap();
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].image.as_deref(), Some("front.jpg"));

	let empty = w
		.service
		.list_listings(&build_filter(Some("Damascus"), None, None, None))
		.await;
	assert_eq!(empty, Err(ListingError::NotFound));
}

#[tokio::test]
async fn owner_may_update_and_others_may_not() {
	let w = world().await;
	let owner_token = token_for(w.realtor);
	let decision = w
		.gate
		.authorize(Some(&owner_token), Operation::UpdateListing, Some(w.listing))
		.await
		.unwrap();
	assert!(decision.is_allowed());
	assert_eq!(decision.caller().and_then(Caller::user_id), Some(w.realtor));

	let buyer_token = token_for(w.buyer);
	let decision = w
		.gate
		.authorize(Some(&buyer_token), Operation::UpdateListing, Some(w.listing))
		.await
		.unwrap();
	assert_eq!(decision, AuthDecision::Denied(DenialReason::Forbidden));

	let decision = w
		.gate
		.authorize(Some(&owner_token), Operation::DeleteListing, Some(ListingId::new(404)))
		.await
		.unwrap();
	assert_eq!(decision, AuthDecision::Denied(DenialReason::NotFound));
}

#[tokio::test]
async fn role_changes_apply_to_the_next_request() {
	let w = world().await;
	let token = token_for(w.buyer);

	let decision = w
		.gate
		.authorize(Some(&token), Operation::CreateListing, None)
		.await
		.unwrap();
	assert_eq!(decision, AuthDecision::Denied(DenialReason::Forbidden));

	w.users.set_role(w.buyer, Role::Realtor).await.unwrap();
	let decision = w
		.gate
		.authorize(Some(&token), Operation::CreateListing, None)
		.await
		.unwrap();
	assert!(decision.is_allowed());
}

#[tokio::test]
async fn token_for_unknown_user_is_unauthenticated() {
	let w = world().await;
	let token = token_for(UserId::new(777));
	let decision = w
		.gate
		.authorize(Some(&token), Operation::InquireListing, Some(w.listing))
		.await
		.unwrap();
	assert_eq!(decision, AuthDecision::Denied(DenialReason::Unauthenticated));
}
