//! # Adapter: one payment interface over two incompatible SDKs
//!
//! ```text
//!   caller ── Payment::deal(PayType, money) ──► PaymentAdapter
//!                                                 ├─ Alipay  ─► AlipaySdk::pay(money)
//!                                                 └─ WeChat  ─► WeChatSdk::wx_pay(money)
//! ```
//!
//! The adapter is a plain wrapper owning both adaptees and forwarding to them.
//!
//! ## Example
//! ```rust
//! use patternbus::patterns::adapter::{Payment, PaymentAdapter, PayType};
//!
//! let target = PaymentAdapter::standard();
//! let pay: PayType = "weixin".parse().unwrap();
//! assert_eq!(target.deal(pay, 99), "wechat pay, amount: 99");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;

/// Adaptee #1: the Alipay SDK surface.
pub trait AlipaySdk {
    /// Charges `money`; returns the SDK's receipt line.
    fn pay(&self, money: u64) -> String;
}

/// Adaptee #2: the WeChat Pay SDK surface.
pub trait WeChatSdk {
    /// Charges `money`; returns the SDK's receipt line.
    fn wx_pay(&self, money: u64) -> String;
}

/// Stock Alipay SDK.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alipay;

impl AlipaySdk for Alipay {
    fn pay(&self, money: u64) -> String {
        format!("alipay pay, amount: {money}")
    }
}

/// Stock WeChat Pay SDK.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeChat;

impl WeChatSdk for WeChat {
    fn wx_pay(&self, money: u64) -> String {
        format!("wechat pay, amount: {money}")
    }
}

/// Payment channel selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayType {
    /// Routed to the Alipay SDK (`"alipay"`).
    Alipay,
    /// Routed to the WeChat Pay SDK (`"weixin"` or `"wechat"`).
    WeChat,
}

impl FromStr for PayType {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alipay" => Ok(PayType::Alipay),
            "weixin" | "wechat" => Ok(PayType::WeChat),
            _ => Err(PatternError::UnknownPayType(s.to_string())),
        }
    }
}

impl fmt::Display for PayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayType::Alipay => f.write_str("alipay"),
            PayType::WeChat => f.write_str("weixin"),
        }
    }
}

/// Target interface the business code talks to.
pub trait Payment {
    /// Charges `money` through the channel picked by `pay_type`.
    fn deal(&self, pay_type: PayType, money: u64) -> String;
}

/// Adapter owning one instance of each SDK.
#[derive(Clone, Debug, Default)]
pub struct PaymentAdapter<A = Alipay, W = WeChat> {
    alipay: A,
    wechat: W,
}

impl PaymentAdapter {
    /// Adapter over the stock [`Alipay`] and [`WeChat`] SDKs.
    pub fn standard() -> Self {
        Self::new(Alipay, WeChat)
    }
}

impl<A, W> PaymentAdapter<A, W> {
    /// Adapter over caller-supplied SDK implementations.
    pub fn new(alipay: A, wechat: W) -> Self {
        Self { alipay, wechat }
    }
}

impl<A: AlipaySdk, W: WeChatSdk> Payment for PaymentAdapter<A, W> {
    fn deal(&self, pay_type: PayType, money: u64) -> String {
        match pay_type {
            PayType::Alipay => self.alipay.pay(money),
            PayType::WeChat => self.wechat.wx_pay(money),
        }
    }
}
