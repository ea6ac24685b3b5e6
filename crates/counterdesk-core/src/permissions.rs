//! Permission catalog for counterdesk.
//!
//! Every guardable action in the application is a [`Permission`], and every
//! permission belongs to exactly one [`Module`]. Both enums are generated from
//! the single module table at the bottom of this file, so referencing an
//! identifier that is not in the table is a compile error and the string form
//! of each identifier is defined in one place.
//!
//! Module membership is explicit rather than derived from the identifier's
//! tokens: `list_customer_count` lives in `customer`, `view_report_sales` in
//! `report` and `edit_setting_invoice` in `setting`.
//!
//! # Example
//!
//! ```
//! use counterdesk_core::permissions::{Module, Permission};
//!
//! let permission: Permission = "edit_branch".parse().unwrap();
//! assert_eq!(permission, Permission::EditBranch);
//! assert_eq!(permission.module(), Module::Branch);
//! assert!(permission.is_edit());
//! ```

use std::fmt;
use std::str::FromStr;

/// Prefix shared by every branch-scoped edit permission.
const EDIT_PREFIX: &str = "edit_";

/// Returned when a string does not name a permission in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission identifier: {0}")]
pub struct UnknownPermission(pub String);

/// Returned when a string does not name a module in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission module: {0}")]
pub struct UnknownModule(pub String);

macro_rules! permission_catalog {
    (
        $(
            $(#[$module_meta:meta])*
            $module:ident => $module_name:literal {
                $( $variant:ident => $identifier:literal ),+ $(,)?
            }
        )+
    ) => {
        /// A named group of related permissions.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Module {
            $( $(#[$module_meta])* $module, )+
        }

        impl Module {
            /// Every module, in catalog order.
            pub const ALL: &'static [Module] = &[ $( Module::$module, )+ ];

            /// The module's catalog name.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Module::$module => $module_name, )+
                }
            }

            /// The module's permissions, in catalog order.
            pub const fn permissions(self) -> &'static [Permission] {
                match self {
                    $( Module::$module => &[ $( Permission::$variant, )+ ], )+
                }
            }
        }

        impl FromStr for Module {
            type Err = UnknownModule;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $module_name => Ok(Module::$module), )+
                    _ => Err(UnknownModule(s.to_string())),
                }
            }
        }

        /// A single guardable action.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Permission {
            $( $( $variant, )+ )+
        }

        impl Permission {
            /// Every permission, flattened in module order then within-module order.
            pub const ALL: &'static [Permission] = &[ $( $( Permission::$variant, )+ )+ ];

            /// The identifier string, e.g. `list_customer`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( $( Permission::$variant => $identifier, )+ )+
                }
            }

            /// The module this permission is governed by.
            pub const fn module(self) -> Module {
                match self {
                    $( $( Permission::$variant )|+ => Module::$module, )+
                }
            }
        }

        impl FromStr for Permission {
            type Err = UnknownPermission;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $( $identifier => Ok(Permission::$variant), )+ )+
                    _ => Err(UnknownPermission(s.to_string())),
                }
            }
        }
    };
}

impl Module {
    /// The module's `<action>_<module>` permission, if the catalog has one.
    ///
    /// Only the module's own permissions are considered.
    pub fn permission(self, action: &str) -> Option<Permission> {
        let identifier = format!("{action}_{}", self.as_str());
        self.permissions()
            .iter()
            .copied()
            .find(|p| p.as_str() == identifier)
    }
}

impl Permission {
    /// Whether this is an `edit_*` permission, which is branch-scoped.
    pub fn is_edit(self) -> bool {
        self.as_str().starts_with(EDIT_PREFIX)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Permission {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Permission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let identifier = String::deserialize(deserializer)?;
        identifier.parse().map_err(serde::de::Error::custom)
    }
}

/// Flattens every module's permission set, module order first.
pub fn list_all() -> impl Iterator<Item = Permission> {
    Module::ALL
        .iter()
        .flat_map(|module| module.permissions().iter().copied())
}

/// Validates a role definition's identifiers against the catalog.
///
/// Stops at the first identifier the catalog does not know.
pub fn validate_identifiers<'a, I>(identifiers: I) -> Result<Vec<Permission>, UnknownPermission>
where
    I: IntoIterator<Item = &'a str>,
{
    identifiers.into_iter().map(str::parse).collect()
}

permission_catalog! {
    Dashboard => "dashboard" {
        ViewDashboard => "view_dashboard",
        ViewDashboardSales => "view_dashboard_sales",
        ViewDashboardPurchases => "view_dashboard_purchases",
        ViewDashboardStock => "view_dashboard_stock",
    }
    Branch => "branch" {
        ListBranch => "list_branch",
        ViewBranch => "view_branch",
        CreateBranch => "create_branch",
        EditBranch => "edit_branch",
        DeleteBranch => "delete_branch",
    }
    Role => "role" {
        ListRole => "list_role",
        ViewRole => "view_role",
        CreateRole => "create_role",
        EditRole => "edit_role",
        DeleteRole => "delete_role",
    }
    User => "user" {
        ListUser => "list_user",
        ViewUser => "view_user",
        CreateUser => "create_user",
        EditUser => "edit_user",
        DeleteUser => "delete_user",
        ResetUserPassword => "reset_user_password",
    }
    Customer => "customer" {
        ListCustomer => "list_customer",
        ListCustomerCount => "list_customer_count",
        ViewCustomer => "view_customer",
        CreateCustomer => "create_customer",
        EditCustomer => "edit_customer",
        DeleteCustomer => "delete_customer",
        ImportCustomer => "import_customer",
        ExportCustomer => "export_customer",
    }
    CustomerGroup => "customer_group" {
        ListCustomerGroup => "list_customer_group",
        CreateCustomerGroup => "create_customer_group",
        EditCustomerGroup => "edit_customer_group",
        DeleteCustomerGroup => "delete_customer_group",
    }
    Supplier => "supplier" {
        ListSupplier => "list_supplier",
        ViewSupplier => "view_supplier",
        CreateSupplier => "create_supplier",
        EditSupplier => "edit_supplier",
        DeleteSupplier => "delete_supplier",
        ExportSupplier => "export_supplier",
    }
    Product => "product" {
        ListProduct => "list_product",
        ListProductCount => "list_product_count",
        ViewProduct => "view_product",
        CreateProduct => "create_product",
        EditProduct => "edit_product",
        DeleteProduct => "delete_product",
        ImportProduct => "import_product",
        ExportProduct => "export_product",
        PrintProductBarcode => "print_product_barcode",
    }
    Category => "category" {
        ListCategory => "list_category",
        CreateCategory => "create_category",
        EditCategory => "edit_category",
        DeleteCategory => "delete_category",
    }
    Brand => "brand" {
        ListBrand => "list_brand",
        CreateBrand => "create_brand",
        EditBrand => "edit_brand",
        DeleteBrand => "delete_brand",
    }
    Unit => "unit" {
        ListUnit => "list_unit",
        CreateUnit => "create_unit",
        EditUnit => "edit_unit",
        DeleteUnit => "delete_unit",
    }
    Stock => "stock" {
        ListStock => "list_stock",
        ViewStock => "view_stock",
        AdjustStock => "adjust_stock",
        ExportStock => "export_stock",
    }
    StockTransfer => "stock_transfer" {
        ListStockTransfer => "list_stock_transfer",
        ViewStockTransfer => "view_stock_transfer",
        CreateStockTransfer => "create_stock_transfer",
        EditStockTransfer => "edit_stock_transfer",
        ConfirmStockTransfer => "confirm_stock_transfer",
        CancelStockTransfer => "cancel_stock_transfer",
    }
    Warehouse => "warehouse" {
        ListWarehouse => "list_warehouse",
        CreateWarehouse => "create_warehouse",
        EditWarehouse => "edit_warehouse",
        DeleteWarehouse => "delete_warehouse",
    }
    Sale => "sale" {
        ListSale => "list_sale",
        ViewSale => "view_sale",
        CreateSale => "create_sale",
        EditSale => "edit_sale",
        DeleteSale => "delete_sale",
        CancelSale => "cancel_sale",
        ReturnSale => "return_sale",
        ExportSale => "export_sale",
    }
    SaleReturn => "sale_return" {
        ListSaleReturn => "list_sale_return",
        ViewSaleReturn => "view_sale_return",
        CreateSaleReturn => "create_sale_return",
        DeleteSaleReturn => "delete_sale_return",
    }
    Purchase => "purchase" {
        ListPurchase => "list_purchase",
        ViewPurchase => "view_purchase",
        CreatePurchase => "create_purchase",
        EditPurchase => "edit_purchase",
        DeletePurchase => "delete_purchase",
        CancelPurchase => "cancel_purchase",
        ReceivePurchase => "receive_purchase",
        ExportPurchase => "export_purchase",
    }
    PurchaseReturn => "purchase_return" {
        ListPurchaseReturn => "list_purchase_return",
        ViewPurchaseReturn => "view_purchase_return",
        CreatePurchaseReturn => "create_purchase_return",
        DeletePurchaseReturn => "delete_purchase_return",
    }
    Quotation => "quotation" {
        ListQuotation => "list_quotation",
        ViewQuotation => "view_quotation",
        CreateQuotation => "create_quotation",
        EditQuotation => "edit_quotation",
        DeleteQuotation => "delete_quotation",
        ConvertQuotation => "convert_quotation",
        PrintQuotation => "print_quotation",
    }
    Invoice => "invoice" {
        ListInvoice => "list_invoice",
        ViewInvoice => "view_invoice",
        CreateInvoice => "create_invoice",
        EditInvoice => "edit_invoice",
        ConfirmInvoice => "confirm_invoice",
        PrintInvoice => "print_invoice",
        CancelInvoice => "cancel_invoice",
    }
    Payment => "payment" {
        ListPayment => "list_payment",
        ViewPayment => "view_payment",
        CreatePayment => "create_payment",
        EditPayment => "edit_payment",
        CancelPayment => "cancel_payment",
    }
    Debt => "debt" {
        ListDebt => "list_debt",
        ViewDebt => "view_debt",
        CreateDebt => "create_debt",
        EditDebt => "edit_debt",
        DeleteDebt => "delete_debt",
        SettleDebt => "settle_debt",
    }
    DebtHistory => "debt_history" {
        ListDebtHistory => "list_debt_history",
        ViewDebtHistory => "view_debt_history",
    }
    Expense => "expense" {
        ListExpense => "list_expense",
        ViewExpense => "view_expense",
        CreateExpense => "create_expense",
        EditExpense => "edit_expense",
        DeleteExpense => "delete_expense",
    }
    ExpenseCategory => "expense_category" {
        ListExpenseCategory => "list_expense_category",
        CreateExpenseCategory => "create_expense_category",
        EditExpenseCategory => "edit_expense_category",
        DeleteExpenseCategory => "delete_expense_category",
    }
    Income => "income" {
        ListIncome => "list_income",
        CreateIncome => "create_income",
        EditIncome => "edit_income",
        DeleteIncome => "delete_income",
    }
    Account => "account" {
        ListAccount => "list_account",
        ViewAccount => "view_account",
        CreateAccount => "create_account",
        EditAccount => "edit_account",
        DeleteAccount => "delete_account",
        TransferAccountBalance => "transfer_account_balance",
    }
    Tax => "tax" {
        ListTax => "list_tax",
        CreateTax => "create_tax",
        EditTax => "edit_tax",
        DeleteTax => "delete_tax",
    }
    Currency => "currency" {
        ListCurrency => "list_currency",
        CreateCurrency => "create_currency",
        EditCurrency => "edit_currency",
        DeleteCurrency => "delete_currency",
    }
    Discount => "discount" {
        ListDiscount => "list_discount",
        CreateDiscount => "create_discount",
        EditDiscount => "edit_discount",
        DeleteDiscount => "delete_discount",
        ApplyDiscount => "apply_discount",
    }
    Coupon => "coupon" {
        ListCoupon => "list_coupon",
        CreateCoupon => "create_coupon",
        EditCoupon => "edit_coupon",
        DeleteCoupon => "delete_coupon",
    }
    Hotel => "hotel" {
        ListHotel => "list_hotel",
        ViewHotel => "view_hotel",
        CreateHotel => "create_hotel",
        EditHotel => "edit_hotel",
        DeleteHotel => "delete_hotel",
    }
    Room => "room" {
        ListRoom => "list_room",
        ViewRoom => "view_room",
        CreateRoom => "create_room",
        EditRoom => "edit_room",
        DeleteRoom => "delete_room",
    }
    Booking => "booking" {
        ListBooking => "list_booking",
        ViewBooking => "view_booking",
        CreateBooking => "create_booking",
        EditBooking => "edit_booking",
        CancelBooking => "cancel_booking",
        CheckInBooking => "check_in_booking",
        CheckOutBooking => "check_out_booking",
    }
    Pos => "pos" {
        ViewPos => "view_pos",
        OpenPosRegister => "open_pos_register",
        ClosePosRegister => "close_pos_register",
        HoldPosOrder => "hold_pos_order",
    }
    Shift => "shift" {
        ListShift => "list_shift",
        ViewShift => "view_shift",
        OpenShift => "open_shift",
        CloseShift => "close_shift",
    }
    Report => "report" {
        ViewReportSales => "view_report_sales",
        ViewReportPurchases => "view_report_purchases",
        ViewReportStock => "view_report_stock",
        ViewReportProfit => "view_report_profit",
        ViewReportTax => "view_report_tax",
        ExportReport => "export_report",
    }
    Setting => "setting" {
        ViewSetting => "view_setting",
        EditSetting => "edit_setting",
        EditSettingInvoice => "edit_setting_invoice",
        EditSettingPrinter => "edit_setting_printer",
    }
    Notification => "notification" {
        ListNotification => "list_notification",
        DeleteNotification => "delete_notification",
    }
    AuditLog => "audit_log" {
        ListAuditLog => "list_audit_log",
        ViewAuditLog => "view_audit_log",
    }
    /// Soft-deleted records across every collection.
    Deleted => "deleted" {
        ListDeleted => "list_deleted",
        RestoreDeleted => "restore_deleted",
        PurgeDeleted => "purge_deleted",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_identifier_belongs_to_exactly_one_module() {
        let mut seen = HashSet::new();
        for module in Module::ALL {
            for permission in module.permissions() {
                assert!(
                    seen.insert(permission.as_str()),
                    "{} listed twice",
                    permission
                );
                assert_eq!(permission.module(), *module);
            }
        }
        assert_eq!(seen.len(), Permission::ALL.len());
    }

    #[test]
    fn test_list_all_preserves_module_then_member_order() {
        let flattened: Vec<Permission> = list_all().collect();
        assert_eq!(flattened, Permission::ALL);
        assert_eq!(flattened.first(), Some(&Permission::ViewDashboard));
        assert_eq!(flattened.last(), Some(&Permission::PurgeDeleted));
    }

    #[test]
    fn test_catalog_size() {
        assert_eq!(Module::ALL.len(), 41);
        assert_eq!(Permission::ALL.len(), 202);
    }

    #[test]
    fn test_identifier_round_trip() {
        for permission in Permission::ALL {
            assert_eq!(permission.as_str().parse::<Permission>(), Ok(*permission));
        }
        for module in Module::ALL {
            assert_eq!(module.as_str().parse::<Module>(), Ok(*module));
        }
    }

    #[test]
    fn test_explicit_membership_overrides_naive_token() {
        assert_eq!(Permission::ListCustomerCount.module(), Module::Customer);
        assert_eq!(Permission::ViewDebtHistory.module(), Module::DebtHistory);
        assert_eq!(Permission::EditSettingInvoice.module(), Module::Setting);
        assert_eq!(Permission::ViewReportSales.module(), Module::Report);
    }

    #[test]
    fn test_module_permission_lookup() {
        assert_eq!(Module::Sale.permission("list"), Some(Permission::ListSale));
        assert_eq!(Module::Customer.permission("edit"), Some(Permission::EditCustomer));
        assert_eq!(Module::Dashboard.permission("list"), None);
        assert_eq!(Module::Sale.permission(""), None);
    }

    #[test]
    fn test_is_edit() {
        assert!(Permission::EditBranch.is_edit());
        assert!(Permission::EditSettingPrinter.is_edit());
        assert!(!Permission::ListCustomer.is_edit());
        assert!(!Permission::CheckInBooking.is_edit());
    }

    #[test]
    fn test_unknown_identifier() {
        let err = "fly_to_moon".parse::<Permission>().unwrap_err();
        assert_eq!(err, UnknownPermission("fly_to_moon".to_string()));
        assert!("".parse::<Permission>().is_err());
        assert!("nowhere".parse::<Module>().is_err());
    }

    #[test]
    fn test_validate_identifiers() {
        let permissions = validate_identifiers(["list_customer", "edit_customer"]).unwrap();
        assert_eq!(
            permissions,
            vec![Permission::ListCustomer, Permission::EditCustomer]
        );

        let err = validate_identifiers(["list_customer", "list_moon"]).unwrap_err();
        assert_eq!(err.0, "list_moon");
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Permission::AdjustStock).unwrap();
        assert_eq!(json, r#""adjust_stock""#);

        let parsed: Permission = serde_json::from_str(r#""cancel_payment""#).unwrap();
        assert_eq!(parsed, Permission::CancelPayment);

        assert!(serde_json::from_str::<Permission>(r#""cancel_moon""#).is_err());
    }
}
