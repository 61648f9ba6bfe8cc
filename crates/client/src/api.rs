//! Storefront API client.
//!
//! Typed calls over `reqwest` for the endpoints the cart coordinator, the
//! checkout flow and the CLI use. The product catalog is cached for
//! 5 minutes using `moka`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use sleepwell_core::CartId;
use sleepwell_core::models::{Cart, CartUpdate, NewCart, NewOrder, Order, Product};
use tracing::{debug, instrument};
use url::Url;

use crate::error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PRODUCTS_KEY: &str = "products";

/// The operations the cart coordinator and checkout flow depend on.
pub trait StorefrontApi: Send + Sync {
    /// Fetch the full product catalog.
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, ClientError>> + Send;

    /// Fetch the cart for a session. A session without a cart yields the
    /// placeholder cart with id 0.
    fn cart_by_session(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Cart, ClientError>> + Send;

    /// Create (or replace) the cart of a session.
    fn create_cart(&self, cart: &NewCart) -> impl Future<Output = Result<Cart, ClientError>> + Send;

    /// Apply a partial update to a stored cart.
    fn update_cart(
        &self,
        id: CartId,
        update: &CartUpdate,
    ) -> impl Future<Output = Result<Cart, ClientError>> + Send;

    /// Delete a stored cart.
    fn delete_cart(&self, id: CartId) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Submit an order.
    fn create_order(
        &self,
        order: &NewOrder,
    ) -> impl Future<Output = Result<Order, ClientError>> + Send;
}

/// Result of a newsletter subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeOutcome {
    /// False when the address was already subscribed.
    pub created: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

// =============================================================================
// ApiClient
// =============================================================================

/// HTTP client for the storefront API.
///
/// Cheap to clone; clones share the connection pool and the catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl ApiClient {
    /// Create a client for the API served at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        // Relative joins would otherwise replace the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url,
                cache,
            }),
        })
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn cart_endpoint(&self, key: &str) -> Result<Url, ClientError> {
        self.endpoint(&format!("api/carts/{}", urlencoding::encode(key)))
    }

    /// Turn a non-success response into `ClientError::Api`, using the
    /// `message` field of a JSON body when there is one.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        let message = serde_json::from_str::<MessageBody>(&body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |parsed| parsed.message,
        );

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Storefront API returned server error"
            );
        } else {
            debug!(status = %status, message = %message, "Storefront API rejected request");
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Fetch the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ClientError> {
        if let Some(cached) = self.inner.cache.get(PRODUCTS_KEY).await {
            debug!("Cache hit for product catalog");
            return Ok(cached.as_ref().clone());
        }

        let response = self
            .inner
            .client
            .get(self.endpoint("api/products")?)
            .send()
            .await?;
        let products: Vec<Product> = Self::read_json(response).await?;

        self.inner
            .cache
            .insert(PRODUCTS_KEY.to_string(), Arc::new(products.clone()))
            .await;

        Ok(products)
    }

    /// Fetch the cart for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    #[instrument(skip(self))]
    pub async fn cart_by_session(&self, session_id: &str) -> Result<Cart, ClientError> {
        let response = self
            .inner
            .client
            .get(self.cart_endpoint(session_id)?)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Create the cart of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the cart.
    #[instrument(skip(self, cart), fields(session_id = %cart.session_id))]
    pub async fn create_cart(&self, cart: &NewCart) -> Result<Cart, ClientError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("api/carts")?)
            .json(cart)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Apply a partial update to a stored cart.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 if the cart does not exist.
    #[instrument(skip(self, update))]
    pub async fn update_cart(&self, id: CartId, update: &CartUpdate) -> Result<Cart, ClientError> {
        let response = self
            .inner
            .client
            .put(self.cart_endpoint(&id.to_string())?)
            .json(update)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Delete a stored cart.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 if the cart does not exist.
    #[instrument(skip(self))]
    pub async fn delete_cart(&self, id: CartId) -> Result<(), ClientError> {
        let response = self
            .inner
            .client
            .delete(self.cart_endpoint(&id.to_string())?)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the order.
    #[instrument(skip(self, order), fields(total = %order.total, items = order.items.len()))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ClientError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("api/orders")?)
            .json(order)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Subscribe an email address to the newsletter.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 400 if the address is missing
    /// or malformed.
    #[instrument(skip(self, email))]
    pub async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, ClientError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("api/newsletter/subscribe")?)
            .json(&json!({ "email": email }))
            .send()
            .await?;

        let created = response.status() == reqwest::StatusCode::CREATED;
        let body: MessageBody = Self::read_json(response).await?;

        Ok(SubscribeOutcome {
            created,
            message: body.message,
        })
    }
}

impl StorefrontApi for ApiClient {
    async fn products(&self) -> Result<Vec<Product>, ClientError> {
        Self::products(self).await
    }

    async fn cart_by_session(&self, session_id: &str) -> Result<Cart, ClientError> {
        Self::cart_by_session(self, session_id).await
    }

    async fn create_cart(&self, cart: &NewCart) -> Result<Cart, ClientError> {
        Self::create_cart(self, cart).await
    }

    async fn update_cart(&self, id: CartId, update: &CartUpdate) -> Result<Cart, ClientError> {
        Self::update_cart(self, id, update).await
    }

    async fn delete_cart(&self, id: CartId) -> Result<(), ClientError> {
        Self::delete_cart(self, id).await
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order, ClientError> {
        Self::create_order(self, order).await
    }
}
