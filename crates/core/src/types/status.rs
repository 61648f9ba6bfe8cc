//! Enumerations shared by the catalog and order models.
//!
//! Every enum uses its `snake_case` name on the wire, in URL path segments
//! (`/api/products/category/{category}`), and in `Display`/`FromStr`.

use serde::{Deserialize, Serialize};

/// Product catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Supplements,
    Bundles,
    Accessories,
}

impl ProductCategory {
    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Supplements => "supplements",
            Self::Bundles => "bundles",
            Self::Accessories => "accessories",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supplements" => Ok(Self::Supplements),
            "bundles" => Ok(Self::Bundles),
            "accessories" => Ok(Self::Accessories),
            _ => Err(format!("invalid product category: {s}")),
        }
    }
}

/// Article (blog) category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleCategory {
    SleepDisorders,
    SleepTips,
    Supplements,
    Research,
}

impl ArticleCategory {
    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SleepDisorders => "sleep_disorders",
            Self::SleepTips => "sleep_tips",
            Self::Supplements => "supplements",
            Self::Research => "research",
        }
    }
}

impl std::fmt::Display for ArticleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArticleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sleep_disorders" => Ok(Self::SleepDisorders),
            "sleep_tips" => Ok(Self::SleepTips),
            "supplements" => Ok(Self::Supplements),
            "research" => Ok(Self::Research),
            _ => Err(format!("invalid article category: {s}")),
        }
    }
}

/// Order lifecycle status.
///
/// New orders start as `Pending`; only the status endpoint moves them on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
