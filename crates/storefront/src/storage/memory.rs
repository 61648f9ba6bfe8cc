//! Process-local [`Storage`] backed by ordered maps behind one lock.
//!
//! Every collection is an id-ordered map with its own counter starting at 1.
//! Unique keys (slugs, usernames, emails, cart sessions) are indexed so
//! lookups by them do not scan.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use sleepwell_core::models::{
    Article, Cart, CartUpdate, Faq, NewArticle, NewCart, NewFaq, NewOrder, NewProduct,
    NewTestimonial, Newsletter, Order, Product, Testimonial, User,
};
use sleepwell_core::{
    ArticleCategory, ArticleId, CartId, Email, FaqId, NewsletterId, OrderId, OrderStatus,
    ProductCategory, ProductId, TestimonialId, UserId,
};

use super::{Storage, StorageError, StorageResult, UserDraft};

/// Rows of one collection plus the next id to hand out.
struct Table<K, V> {
    rows: BTreeMap<K, V>,
    next_id: i32,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<K: Ord + Copy + From<i32>, V: Clone> Table<K, V> {
    fn allocate(&mut self) -> K {
        let id = K::from(self.next_id);
        self.next_id += 1;
        id
    }

    fn get(&self, id: K) -> Option<V> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<V> {
        self.rows.values().cloned().collect()
    }

    fn filter(&self, predicate: impl Fn(&V) -> bool) -> Vec<V> {
        self.rows.values().filter(|row| predicate(row)).cloned().collect()
    }
}

#[derive(Default)]
struct Collections {
    users: Table<UserId, User>,
    products: Table<ProductId, Product>,
    articles: Table<ArticleId, Article>,
    testimonials: Table<TestimonialId, Testimonial>,
    faqs: Table<FaqId, Faq>,
    carts: Table<CartId, Cart>,
    orders: Table<OrderId, Order>,
    newsletters: Table<NewsletterId, Newsletter>,

    product_slugs: HashMap<String, ProductId>,
    article_slugs: HashMap<String, ArticleId>,
    usernames: HashMap<String, UserId>,
    user_emails: HashMap<Email, UserId>,
    cart_sessions: HashMap<String, CartId>,
    newsletter_emails: HashMap<Email, NewsletterId>,
}

/// In-memory storefront store.
#[derive(Default)]
pub struct MemStorage {
    inner: RwLock<Collections>,
}

impl MemStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Collections>> {
        self.inner
            .read()
            .map_err(|_| StorageError::Unavailable("lock poisoned"))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Collections>> {
        self.inner
            .write()
            .map_err(|_| StorageError::Unavailable("lock poisoned"))
    }
}

#[allow(clippy::significant_drop_tightening)]
impl Storage for MemStorage {
    fn health_check(&self) -> StorageResult<()> {
        self.read().map(|_| ())
    }

    // =========================================================================
    // Users
    // =========================================================================

    fn user(&self, id: UserId) -> StorageResult<Option<User>> {
        Ok(self.read()?.users.get(id))
    }

    fn user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let data = self.read()?;
        Ok(data
            .usernames
            .get(username)
            .and_then(|id| data.users.get(*id)))
    }

    fn user_by_email(&self, email: &Email) -> StorageResult<Option<User>> {
        let data = self.read()?;
        Ok(data.user_emails.get(email).and_then(|id| data.users.get(*id)))
    }

    fn create_user(&self, user: UserDraft) -> StorageResult<User> {
        let mut guard = self.write()?;
        let data = &mut *guard;
        if data.usernames.contains_key(&user.username) {
            return Err(StorageError::Conflict("Username already exists".to_string()));
        }
        if data.user_emails.contains_key(&user.email) {
            return Err(StorageError::Conflict("Email already exists".to_string()));
        }

        let id = data.users.allocate();
        let record = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
        };
        data.usernames.insert(record.username.clone(), id);
        data.user_emails.insert(record.email.clone(), id);
        data.users.rows.insert(id, record.clone());
        Ok(record)
    }

    // =========================================================================
    // Products
    // =========================================================================

    fn products(&self) -> StorageResult<Vec<Product>> {
        Ok(self.read()?.products.all())
    }

    fn product(&self, id: ProductId) -> StorageResult<Option<Product>> {
        Ok(self.read()?.products.get(id))
    }

    fn product_by_slug(&self, slug: &str) -> StorageResult<Option<Product>> {
        let data = self.read()?;
        Ok(data
            .product_slugs
            .get(slug)
            .and_then(|id| data.products.get(*id)))
    }

    fn products_by_category(&self, category: ProductCategory) -> StorageResult<Vec<Product>> {
        Ok(self.read()?.products.filter(|p| p.category == category))
    }

    fn featured_products(&self) -> StorageResult<Vec<Product>> {
        Ok(self.read()?.products.filter(|p| p.featured))
    }

    fn best_seller_products(&self) -> StorageResult<Vec<Product>> {
        Ok(self.read()?.products.filter(|p| p.best_seller))
    }

    fn create_product(&self, product: NewProduct) -> StorageResult<Product> {
        let mut guard = self.write()?;
        let data = &mut *guard;
        if data.product_slugs.contains_key(&product.slug) {
            return Err(StorageError::Conflict("Slug already exists".to_string()));
        }

        let id = data.products.allocate();
        let record = product.into_record(id, Utc::now());
        data.product_slugs.insert(record.slug.clone(), id);
        data.products.rows.insert(id, record.clone());
        Ok(record)
    }

    // =========================================================================
    // Articles
    // =========================================================================

    fn articles(&self) -> StorageResult<Vec<Article>> {
        Ok(self.read()?.articles.all())
    }

    fn article(&self, id: ArticleId) -> StorageResult<Option<Article>> {
        Ok(self.read()?.articles.get(id))
    }

    fn article_by_slug(&self, slug: &str) -> StorageResult<Option<Article>> {
        let data = self.read()?;
        Ok(data
            .article_slugs
            .get(slug)
            .and_then(|id| data.articles.get(*id)))
    }

    fn articles_by_category(&self, category: ArticleCategory) -> StorageResult<Vec<Article>> {
        Ok(self.read()?.articles.filter(|a| a.category == category))
    }

    fn featured_articles(&self) -> StorageResult<Vec<Article>> {
        Ok(self.read()?.articles.filter(|a| a.featured))
    }

    fn create_article(&self, article: NewArticle) -> StorageResult<Article> {
        let mut guard = self.write()?;
        let data = &mut *guard;
        if data.article_slugs.contains_key(&article.slug) {
            return Err(StorageError::Conflict("Slug already exists".to_string()));
        }

        let id = data.articles.allocate();
        let record = article.into_record(id, Utc::now());
        data.article_slugs.insert(record.slug.clone(), id);
        data.articles.rows.insert(id, record.clone());
        Ok(record)
    }

    // =========================================================================
    // Testimonials & FAQs
    // =========================================================================

    fn testimonials(&self) -> StorageResult<Vec<Testimonial>> {
        Ok(self.read()?.testimonials.all())
    }

    fn featured_testimonials(&self) -> StorageResult<Vec<Testimonial>> {
        Ok(self.read()?.testimonials.filter(|t| t.featured))
    }

    fn create_testimonial(&self, testimonial: NewTestimonial) -> StorageResult<Testimonial> {
        let mut data = self.write()?;
        let id = data.testimonials.allocate();
        let record = testimonial.into_record(id, Utc::now());
        data.testimonials.rows.insert(id, record.clone());
        Ok(record)
    }

    fn faqs(&self) -> StorageResult<Vec<Faq>> {
        let mut faqs = self.read()?.faqs.all();
        faqs.sort_by_key(|faq| (faq.order, faq.id));
        Ok(faqs)
    }

    fn create_faq(&self, faq: NewFaq) -> StorageResult<Faq> {
        let mut data = self.write()?;
        let id = data.faqs.allocate();
        let record = faq.into_record(id);
        data.faqs.rows.insert(id, record.clone());
        Ok(record)
    }

    // =========================================================================
    // Carts
    // =========================================================================

    fn cart(&self, id: CartId) -> StorageResult<Option<Cart>> {
        Ok(self.read()?.carts.get(id))
    }

    fn cart_by_session(&self, session_id: &str) -> StorageResult<Option<Cart>> {
        let data = self.read()?;
        Ok(data
            .cart_sessions
            .get(session_id)
            .and_then(|id| data.carts.get(*id)))
    }

    fn create_cart(&self, cart: NewCart) -> StorageResult<Cart> {
        let mut guard = self.write()?;
        let data = &mut *guard;
        let now = Utc::now();

        if let Some(id) = data.cart_sessions.get(&cart.session_id)
            && let Some(existing) = data.carts.rows.get_mut(id)
        {
            existing.user_id = cart.user_id;
            existing.items = cart.items;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let id = data.carts.allocate();
        let record = Cart {
            id,
            user_id: cart.user_id,
            session_id: cart.session_id,
            items: cart.items,
            created_at: now,
            updated_at: now,
        };
        data.cart_sessions.insert(record.session_id.clone(), id);
        data.carts.rows.insert(id, record.clone());
        Ok(record)
    }

    fn update_cart(&self, id: CartId, update: CartUpdate) -> StorageResult<Option<Cart>> {
        let mut guard = self.write()?;
        let data = &mut *guard;

        let Some(cart) = data.carts.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(session_id) = update.session_id
            && session_id != cart.session_id
        {
            if data
                .cart_sessions
                .get(&session_id)
                .is_some_and(|owner| *owner != id)
            {
                return Err(StorageError::Conflict(format!(
                    "session {session_id} already has a cart"
                )));
            }
            data.cart_sessions.remove(&cart.session_id);
            data.cart_sessions.insert(session_id.clone(), id);
            cart.session_id = session_id;
        }
        if let Some(user_id) = update.user_id {
            cart.user_id = Some(user_id);
        }
        if let Some(items) = update.items {
            cart.items = items;
        }
        cart.updated_at = Utc::now();

        Ok(Some(cart.clone()))
    }

    fn delete_cart(&self, id: CartId) -> StorageResult<bool> {
        let mut guard = self.write()?;
        let data = &mut *guard;

        let Some(cart) = data.carts.rows.remove(&id) else {
            return Ok(false);
        };
        if data.cart_sessions.get(&cart.session_id) == Some(&id) {
            data.cart_sessions.remove(&cart.session_id);
        }
        Ok(true)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    fn order(&self, id: OrderId) -> StorageResult<Option<Order>> {
        Ok(self.read()?.orders.get(id))
    }

    fn user_orders(&self, user_id: UserId) -> StorageResult<Vec<Order>> {
        Ok(self
            .read()?
            .orders
            .filter(|o| o.user_id == Some(user_id)))
    }

    fn create_order(&self, order: NewOrder) -> StorageResult<Order> {
        let mut data = self.write()?;
        let id = data.orders.allocate();
        let record = order.into_record(id, Utc::now());
        data.orders.rows.insert(id, record.clone());
        Ok(record)
    }

    fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> StorageResult<Option<Order>> {
        let mut data = self.write()?;
        Ok(data.orders.rows.get_mut(&id).map(|order| {
            order.status = status;
            order.clone()
        }))
    }

    // =========================================================================
    // Newsletter
    // =========================================================================

    fn subscribe(&self, email: &Email) -> StorageResult<Newsletter> {
        let mut guard = self.write()?;
        let data = &mut *guard;

        if let Some(id) = data.newsletter_emails.get(email)
            && let Some(existing) = data.newsletters.get(*id)
        {
            return Ok(existing);
        }

        let id = data.newsletters.allocate();
        let record = Newsletter {
            id,
            email: email.clone(),
            created_at: Utc::now(),
        };
        data.newsletter_emails.insert(email.clone(), id);
        data.newsletters.rows.insert(id, record.clone());
        Ok(record)
    }

    fn is_subscribed(&self, email: &Email) -> StorageResult<bool> {
        Ok(self.read()?.newsletter_emails.contains_key(email))
    }
}
