#![allow(dead_code)]

use sqlx::PgPool;
use stockroom_db::models::product::{CreateProduct, Product};
use stockroom_db::models::user::{CreateUser, User};
use stockroom_db::repositories::{ProductRepo, UserRepo};

pub async fn create_user(pool: &PgPool, email: &str) -> User {
    let input = CreateUser {
        email: email.to_string(),
        display_name: "Operador Teste".to_string(),
        job_title: "Operador".to_string(),
        password_hash: "not-a-real-hash".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

pub fn new_product(code: &str, current_stock: i32, min_stock: i32) -> CreateProduct {
    CreateProduct {
        name: format!("Produto {code}"),
        code: code.to_string(),
        category_id: None,
        description: None,
        product_type: None,
        material: None,
        size: None,
        weight: None,
        unit_of_measure: None,
        current_stock: Some(current_stock),
        min_stock: Some(min_stock),
        unit_price: None,
        location: None,
        is_active: None,
    }
}

pub async fn create_product(pool: &PgPool, code: &str, current_stock: i32, min_stock: i32) -> Product {
    ProductRepo::create(pool, &new_product(code, current_stock, min_stock).normalized())
        .await
        .unwrap()
}
