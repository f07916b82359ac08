//! Order line item records produced by the layout extractors.
//!
//! Field names are serialized in camelCase and form part of the output
//! contract: consumers rendering tables key their columns on them.

use serde::{Deserialize, Serialize};

use crate::extract::Layout;

/// Unit of measure carried by compact and fused lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    /// Units (unidades).
    #[serde(rename = "UN")]
    Un,
    /// Kilograms.
    #[serde(rename = "KG")]
    Kg,
    /// Pieces.
    #[serde(rename = "PCS")]
    Pcs,
}

impl UnitOfMeasure {
    /// Parse a unit token, ignoring case.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "UN" => Some(Self::Un),
            "KG" => Some(Self::Kg),
            "PCS" => Some(Self::Pcs),
            _ => None,
        }
    }

    /// Normalized uppercase form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Un => "UN",
            Self::Kg => "KG",
            Self::Pcs => "PCS",
        }
    }
}

impl std::fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A multi-line item (header line plus continuation lines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactItem {
    /// Five-digit item number, leading zeros kept.
    pub item_number: String,

    /// Eight-digit material code.
    pub material_code: String,

    /// Description, extended by continuation lines.
    pub description: String,

    /// Quantity as printed (digits only).
    pub quantity: String,

    /// Unit of measure.
    pub unit_of_measure: UnitOfMeasure,

    /// Delivery date as `YYYY-MM-DD`.
    pub delivery_date: String,

    /// Value of the last `Marca:` line.
    pub brand: Option<String>,

    /// Value of the last `REF:` line.
    pub reference: Option<String>,

    /// Value of the last `Fornecedor:` line.
    pub supplier: Option<String>,
}

/// A six-line positional block item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockItem {
    /// Item number, taken from the fractional part of the quantity line.
    pub item_number: u32,

    /// Destination code (third line of the block).
    pub destiny: String,

    /// Quantity, taken from the integral part of the quantity line.
    pub quantity: u32,

    /// Short designation code.
    pub designation: String,

    /// Specifications (free text).
    pub specifications: String,

    /// Parts description, without the trailing reference number.
    pub parts: String,

    /// Reference in normalized `(digits)` form.
    pub reference: Option<String>,
}

/// A fused single-line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusedItem {
    pub item_number: String,
    pub quantity: f64,
    pub unit_of_measure: UnitOfMeasure,
    /// Delivery date as `DD/MM/YYYY`.
    pub delivery_date: String,
    /// `<prefix> <code> - <text>`.
    pub description: String,
    pub price: f64,
    pub amount: f64,
}

/// Any record emitted by the dispatcher.
///
/// Serialized untagged: each record is a plain object with its own keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemRecord {
    Compact(CompactItem),
    Block(BlockItem),
    Fused(FusedItem),
}

impl ItemRecord {
    /// Layout that produced this record.
    pub fn layout(&self) -> Layout {
        match self {
            ItemRecord::Compact(_) => Layout::MultiLine,
            ItemRecord::Block(_) => Layout::FixedBlock,
            ItemRecord::Fused(_) => Layout::FusedLine,
        }
    }

    /// Column names and cell values, for tabular rendering.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ItemRecord::Compact(_) => CompactItem::COLUMNS,
            ItemRecord::Block(_) => BlockItem::COLUMNS,
            ItemRecord::Fused(_) => FusedItem::COLUMNS,
        }
    }

    /// Cell values in [`ItemRecord::columns`] order.
    pub fn cells(&self) -> Vec<String> {
        match self {
            ItemRecord::Compact(item) => item.cells(),
            ItemRecord::Block(item) => item.cells(),
            ItemRecord::Fused(item) => item.cells(),
        }
    }
}

impl From<CompactItem> for ItemRecord {
    fn from(item: CompactItem) -> Self {
        ItemRecord::Compact(item)
    }
}

impl From<BlockItem> for ItemRecord {
    fn from(item: BlockItem) -> Self {
        ItemRecord::Block(item)
    }
}

impl From<FusedItem> for ItemRecord {
    fn from(item: FusedItem) -> Self {
        ItemRecord::Fused(item)
    }
}

/// A record that renders as one table row.
pub trait TabularRecord {
    /// Column headers, matching the serialized field names.
    const COLUMNS: &'static [&'static str];

    /// Cell values in column order. Absent optionals render as empty.
    fn cells(&self) -> Vec<String>;
}

impl TabularRecord for CompactItem {
    const COLUMNS: &'static [&'static str] = &[
        "itemNumber",
        "materialCode",
        "description",
        "quantity",
        "unitOfMeasure",
        "deliveryDate",
        "brand",
        "reference",
        "supplier",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.item_number.clone(),
            self.material_code.clone(),
            self.description.clone(),
            self.quantity.clone(),
            self.unit_of_measure.to_string(),
            self.delivery_date.clone(),
            self.brand.clone().unwrap_or_default(),
            self.reference.clone().unwrap_or_default(),
            self.supplier.clone().unwrap_or_default(),
        ]
    }
}

impl TabularRecord for BlockItem {
    const COLUMNS: &'static [&'static str] = &[
        "itemNumber",
        "destiny",
        "quantity",
        "designation",
        "specifications",
        "parts",
        "reference",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.item_number.to_string(),
            self.destiny.clone(),
            self.quantity.to_string(),
            self.designation.clone(),
            self.specifications.clone(),
            self.parts.clone(),
            self.reference.clone().unwrap_or_default(),
        ]
    }
}

impl TabularRecord for FusedItem {
    const COLUMNS: &'static [&'static str] = &[
        "itemNumber",
        "quantity",
        "unitOfMeasure",
        "deliveryDate",
        "description",
        "price",
        "amount",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.item_number.clone(),
            self.quantity.to_string(),
            self.unit_of_measure.to_string(),
            self.delivery_date.clone(),
            self.description.clone(),
            self.price.to_string(),
            self.amount.to_string(),
        ]
    }
}
