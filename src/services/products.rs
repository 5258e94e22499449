//! Product catalogue management.

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::forms::product::ProductForm;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists products sorted by name.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let mut products = repo.list_products().map_err(|err| {
        log::error!("Failed to list products: {err}");
        ServiceError::from(err)
    })?;
    products.sort_by_key(|p| p.name.to_lowercase());
    Ok(products)
}

pub fn get_product<R>(repo: &R, product_id: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let product_id = ProductId::new(product_id)?;
    repo.list_products()
        .map_err(ServiceError::from)?
        .into_iter()
        .find(|p| p.id == product_id)
        .ok_or(ServiceError::NotFound)
}

/// Creates a product, or updates it when `product_id` is given.
pub fn save_product<R>(
    repo: &R,
    product_id: Option<&str>,
    form: ProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let new_product = NewProduct::try_from(form).map_err(|err| {
        log::error!("Failed to validate product form: {err}");
        ServiceError::from(err)
    })?;

    let result = match product_id {
        Some(id) => repo.update_product(&ProductId::new(id)?, &new_product),
        None => repo.create_product(&new_product),
    };

    result.map_err(|err| {
        log::error!("Failed to save product {}: {err}", new_product.name);
        ServiceError::from(err)
    })
}

pub fn delete_product<R>(repo: &R, product_id: &str) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let product_id = ProductId::new(product_id)?;
    repo.delete_product(&product_id).map_err(|err| {
        log::error!("Failed to delete product {product_id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Money, ProductName};
    use crate::repository::mock::MockRepository;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            name: ProductName::new(name).unwrap(),
            description: None,
            price: Money::from_cents(100),
            wholesale_price: None,
            image: None,
        }
    }

    #[test]
    fn lists_sorted_by_name() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .returning(|| Ok(vec![product("1", "Suavizante"), product("2", "cloro")]));

        let names: Vec<_> = list_products(&repo)
            .unwrap()
            .into_iter()
            .map(|p| p.name.into_inner())
            .collect();

        assert_eq!(names, vec!["cloro", "Suavizante"]);
    }

    #[test]
    fn save_converts_price_to_cents() {
        let mut repo = MockRepository::new();
        repo.expect_create_product()
            .withf(|p| {
                p.price == Money::from_cents(1999)
                    && p.wholesale_price == Some(Money::from_cents(1500))
            })
            .times(1)
            .returning(|p| {
                Ok(Product {
                    price: p.price,
                    wholesale_price: p.wholesale_price,
                    ..product("p1", p.name.as_str())
                })
            });

        let saved = save_product(
            &repo,
            None,
            ProductForm {
                name: "Jabón".into(),
                price: 19.99,
                wholesale_price: Some(15.0),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(saved.price.to_string(), "$19.99");
    }

    #[test]
    fn negative_price_never_reaches_backend() {
        let mut repo = MockRepository::new();
        repo.expect_create_product().times(0);
        let result = save_product(
            &repo,
            None,
            ProductForm {
                name: "Jabón".into(),
                price: -1.0,
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn update_targets_given_id() {
        let mut repo = MockRepository::new();
        repo.expect_update_product()
            .withf(|id, _| id.as_str() == "p7")
            .times(1)
            .returning(|id, p| Ok(product(id.as_str(), p.name.as_str())));

        let saved = save_product(
            &repo,
            Some("p7"),
            ProductForm {
                name: "Cloro".into(),
                price: 10.0,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(saved.id.as_str(), "p7");
    }
}
