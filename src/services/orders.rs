//! Order entry, status changes, payments and printable documents.

use crate::domain::order::{NewOrder, Order, OrderDocument, OrderStatus};
use crate::domain::types::{Money, OrderId};
use crate::dto::orders::{OrderFormData, OrdersPageData, StatusCounts};
use crate::forms::order::{OrderForm, OrderQuote};
use crate::forms::payment::PaymentForm;
use crate::repository::{
    ClientReader, DocumentReader, OrderReader, OrderWriter, ProductReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Lists orders, newest first, with counts per status over the full list.
pub fn list_orders<R>(repo: &R, filter: Option<OrderStatus>) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    let mut orders = repo.list_orders().map_err(|err| {
        log::error!("Failed to list orders: {err}");
        ServiceError::from(err)
    })?;
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let counts = StatusCounts::from_orders(&orders);
    if let Some(status) = filter {
        orders.retain(|o| o.status == status);
    }

    Ok(OrdersPageData {
        orders,
        filter,
        counts,
    })
}

pub fn get_order<R>(repo: &R, order_id: &str) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    let order_id = OrderId::new(order_id)?;
    repo.list_orders()
        .map_err(ServiceError::from)?
        .into_iter()
        .find(|o| o.id == order_id)
        .ok_or(ServiceError::NotFound)
}

/// Active clients and the product catalogue offered by the order form.
pub fn load_order_form<R>(repo: &R) -> ServiceResult<OrderFormData>
where
    R: ClientReader + ProductReader + ?Sized,
{
    let mut clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to list clients: {err}");
        ServiceError::from(err)
    })?;
    clients.retain(|c| c.is_active());
    clients.sort_by_key(|c| c.name.to_lowercase());

    let mut products = repo.list_products().map_err(|err| {
        log::error!("Failed to list products: {err}");
        ServiceError::from(err)
    })?;
    products.sort_by_key(|p| p.name.to_lowercase());

    Ok(OrderFormData { clients, products })
}

/// Validates the form against the current catalogue and places the order.
///
/// Returns the created order and the locally computed quote.
pub fn create_order<R>(repo: &R, form: OrderForm) -> ServiceResult<(Order, OrderQuote)>
where
    R: ClientReader + ProductReader + OrderWriter + ?Sized,
{
    let choices = load_order_form(repo)?;

    if !choices
        .clients
        .iter()
        .any(|c| c.id.as_str() == form.client_id.trim())
    {
        log::error!("Order rejected: client {} is not active", form.client_id);
        return Err(ServiceError::Form(
            "client does not exist or is not active".to_string(),
        ));
    }

    let quote = form.quote(&choices.products).map_err(|err| {
        log::error!("Failed to price order: {err}");
        ServiceError::from(err)
    })?;

    let new_order = NewOrder::try_from(form).map_err(|err| {
        log::error!("Failed to validate order form: {err}");
        ServiceError::from(err)
    })?;

    let order = repo.create_order(&new_order).map_err(|err| {
        log::error!("Failed to create order: {err}");
        ServiceError::from(err)
    })?;

    if order.total != quote.total {
        log::warn!(
            "Order {} total {} differs from quoted {}",
            order.id,
            order.total,
            quote.total
        );
    }

    Ok((order, quote))
}

/// Moves a pending order to completed or cancelled.
pub fn update_order_status<R>(repo: &R, order_id: &str, status: OrderStatus) -> ServiceResult<Order>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    let order = get_order(repo, order_id)?;
    if !order.status.can_transition_to(status) {
        return Err(ServiceError::InvalidTransition {
            from: order.status,
            to: status,
        });
    }

    repo.update_order_status(&order.id, status).map_err(|err| {
        log::error!("Failed to update order {}: {err}", order.id);
        ServiceError::from(err)
    })
}

/// Records a partial payment and returns the updated order.
pub fn register_payment<R>(repo: &R, order_id: &str, form: PaymentForm) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    let order_id = OrderId::new(order_id)?;
    let amount = Money::try_from(form).map_err(|err| {
        log::error!("Failed to validate payment: {err}");
        ServiceError::from(err)
    })?;

    repo.register_payment(&order_id, amount).map_err(|err| {
        log::error!("Failed to register payment on order {order_id}: {err}");
        ServiceError::from(err)
    })
}

/// Downloads an order's invoice or work order as PDF bytes, with the
/// suggested file name.
pub fn download_document<R>(
    repo: &R,
    order_id: &str,
    kind: OrderDocument,
) -> ServiceResult<(String, Vec<u8>)>
where
    R: DocumentReader + ?Sized,
{
    let order_id = OrderId::new(order_id)?;
    let bytes = repo.fetch_order_document(&order_id, kind).map_err(|err| {
        log::error!("Failed to download {} for order {order_id}: {err}", kind.slug());
        ServiceError::from(err)
    })?;
    Ok((kind.file_name(&order_id), bytes))
}
