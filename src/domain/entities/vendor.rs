use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VendorId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorStatus {
    Active,
    Pending,
    Suspended,
}

impl VendorStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VendorStatus::Active => "active",
            VendorStatus::Pending => "pending",
            VendorStatus::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub category: String,
    pub status: VendorStatus,
    pub contact: String,
    pub rating: f32,
    pub onboarded: NaiveDate,
}
