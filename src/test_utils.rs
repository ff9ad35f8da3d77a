use crate::auth::{issue_session_jwt, Principal, SessionJwtConfig};
use crate::config::PolicyConfig;
use crate::db::{
    establish_connection_pool, run_db_migrations, DbConnection, FoodItemOperations, MemoryStore,
    PgPool, RepositoryError, UserOperations,
};
use crate::models::catalog::{FoodItem, NewFoodItem};
use crate::models::common::{DietType, MealType, Role};
use crate::models::directory::{NewSupplier, NewUserProfile, Supplier, UserProfile};
use crate::traits::CatalogStore;
use crate::AppState;
use actix_web::http::header;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

// Fixture strategy:
// - One department, management, two employees and two suppliers.
// - Supplier A offers three items (the last one unavailable), supplier B one.
// - Prices are (base, employee, hospital) in minor units.
const TEST_SESSION_SECRET: &str = "test-session-secret";
pub const TEST_DEPARTMENT_ID: i32 = 1;

pub struct TestFixtures {
    pub management: Principal,
    pub employee: Principal,
    pub other_employee: Principal,
    pub supplier_a: Principal,
    pub supplier_b: Principal,
    /// Supplier A: idli (100/80/120), veg thali (150/120/180), fish curry (unavailable).
    pub supplier_a_items: Vec<FoodItem>,
    pub supplier_b_items: Vec<FoodItem>,
}

impl TestFixtures {
    pub fn supplier_a_id(&self) -> Uuid {
        self.supplier_a.role_id
    }

    pub fn supplier_b_id(&self) -> Uuid {
        self.supplier_b.role_id
    }
}

pub fn test_session_config() -> SessionJwtConfig {
    SessionJwtConfig::new(TEST_SESSION_SECRET)
}

/// `Authorization` header carrying a fresh session for `principal`.
pub fn auth_header_for(principal: &Principal) -> (header::HeaderName, String) {
    let token = issue_session_jwt(principal, &test_session_config()).expect("sign session");
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn profile(name: &str, role: Role, role_id: Uuid, department_id: Option<i32>) -> UserProfile {
    UserProfile {
        user_id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@hospital.test", name.to_lowercase().replace(' ', ".")),
        role,
        role_id,
        department_id,
        created_at: Utc::now(),
    }
}

fn principal_of(user: &UserProfile) -> Principal {
    Principal::new(user.user_id, user.role, user.role_id)
}

fn item(supplier_id: Uuid, name: &str, prices: (i64, i64, i64), available: bool) -> NewFoodItem {
    NewFoodItem {
        supplier_id,
        name: name.to_string(),
        description: None,
        category: "Meals".to_string(),
        diet_type: DietType::Veg,
        base_price: prices.0,
        employee_price: prices.1,
        hospital_price: prices.2,
        available,
        image_url: None,
    }
}

fn catalog_for(supplier_a: Uuid, supplier_b: Uuid) -> (Vec<NewFoodItem>, Vec<NewFoodItem>) {
    (
        vec![
            item(supplier_a, "Idli", (100, 80, 120), true),
            item(supplier_a, "Veg Thali", (150, 120, 180), true),
            NewFoodItem {
                diet_type: DietType::NonVeg,
                ..item(supplier_a, "Fish Curry", (200, 150, 250), false)
            },
        ],
        vec![item(supplier_b, "Masala Chai", (20, 15, 25), true)],
    )
}

fn seed_catalog(
    catalog: &dyn CatalogStore,
    items: Vec<NewFoodItem>,
) -> Result<Vec<FoodItem>, RepositoryError> {
    items
        .into_iter()
        .map(|item| catalog.insert_food_item(item))
        .collect()
}

pub fn seed_memory_fixtures(store: &MemoryStore) -> Result<TestFixtures, RepositoryError> {
    let management = profile("Mona Manager", Role::Management, Uuid::new_v4(), None);
    let employee = profile("Eli Employee", Role::NormalEmployee, Uuid::new_v4(), Some(TEST_DEPARTMENT_ID));
    let other_employee = profile("Omar Other", Role::NormalEmployee, Uuid::new_v4(), Some(TEST_DEPARTMENT_ID));

    let mut suppliers = Vec::new();
    for (name, food_type) in [("Annapurna Kitchen", MealType::Breakfast), ("Chai Point", MealType::Beverages)] {
        let supplier_id = Uuid::new_v4();
        let user = profile(name, Role::Supplier, supplier_id, None);
        store.insert_supplier(Supplier {
            supplier_id,
            user_id: user.user_id,
            name: name.to_string(),
            food_type,
            phone: None,
            created_at: Utc::now(),
        })?;
        store.insert_user(user.clone())?;
        suppliers.push(user);
    }
    for user in [&management, &employee, &other_employee] {
        store.insert_user(user.clone())?;
    }

    let (a_items, b_items) = catalog_for(suppliers[0].role_id, suppliers[1].role_id);
    Ok(TestFixtures {
        management: principal_of(&management),
        employee: principal_of(&employee),
        other_employee: principal_of(&other_employee),
        supplier_a: principal_of(&suppliers[0]),
        supplier_b: principal_of(&suppliers[1]),
        supplier_a_items: seed_catalog(store, a_items)?,
        supplier_b_items: seed_catalog(store, b_items)?,
    })
}

/// A seeded in-memory application state.
pub fn memory_state(policy: PolicyConfig) -> (AppState, MemoryStore, TestFixtures) {
    let store = MemoryStore::new();
    let fixtures = seed_memory_fixtures(&store).expect("seed memory fixtures");
    (AppState::in_memory(store.clone(), policy), store, fixtures)
}

pub fn build_test_pool(database_url: &str) -> Result<PgPool, RepositoryError> {
    let pool = establish_connection_pool(database_url, 4)?;
    run_db_migrations(&pool)?;
    Ok(pool)
}

pub fn reset_db(pool: &PgPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query(
        "TRUNCATE TABLE order_items, orders, complaints, food_items, suppliers, users, departments \
         RESTART IDENTITY CASCADE",
    )
    .execute(conn.connection())
    .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

fn new_profile(user: &UserProfile) -> NewUserProfile {
    NewUserProfile {
        user_id: user.user_id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        role_id: user.role_id,
        department_id: user.department_id,
    }
}

/// Same shape as [`seed_memory_fixtures`], written to PostgreSQL.
pub fn seed_db_fixtures(pool: &PgPool) -> Result<TestFixtures, RepositoryError> {
    let users = UserOperations::new(pool.clone());
    let department_id = users.create_department("Cardiology")?;

    let management = profile("Mona Manager", Role::Management, Uuid::new_v4(), None);
    let employee = profile("Eli Employee", Role::NormalEmployee, Uuid::new_v4(), Some(department_id));
    let other_employee = profile("Omar Other", Role::NormalEmployee, Uuid::new_v4(), Some(department_id));
    for user in [&management, &employee, &other_employee] {
        users.create_user(new_profile(user))?;
    }

    let mut suppliers = Vec::new();
    for (name, food_type) in [("Annapurna Kitchen", MealType::Breakfast), ("Chai Point", MealType::Beverages)] {
        let user = profile(name, Role::Supplier, Uuid::new_v4(), None);
        users.create_user(new_profile(&user))?;
        users.create_supplier(NewSupplier {
            supplier_id: user.role_id,
            user_id: user.user_id,
            name: name.to_string(),
            food_type,
            phone: None,
        })?;
        suppliers.push(user);
    }

    let catalog = FoodItemOperations::new(pool.clone());
    let (a_items, b_items) = catalog_for(suppliers[0].role_id, suppliers[1].role_id);
    Ok(TestFixtures {
        management: principal_of(&management),
        employee: principal_of(&employee),
        other_employee: principal_of(&other_employee),
        supplier_a: principal_of(&suppliers[0]),
        supplier_b: principal_of(&suppliers[1]),
        supplier_a_items: seed_catalog(&catalog, a_items)?,
        supplier_b_items: seed_catalog(&catalog, b_items)?,
    })
}
