use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    AdminLoginRequest, AdminLoginResponse, ChangePasswordRequest, FarmerLoginRequest,
    FarmerLoginResponse, Role, SuccessResponse,
};
use crate::modules::farmers::model::{
    CreateFarmerResponse, DeleteFarmerRequest, Farmer, FarmerListResponse, RegisterFarmerRequest,
    RegisterFarmerResponse,
};
use crate::modules::payments::model::{
    CreatePaymentRequest, HistoryResponse, Payment, PaymentResponse, UpdatePaymentRequest,
};
use crate::modules::work::model::{
    CreateWorkRequest, UpdateWorkRequest, WorkListResponse, WorkRecord, WorkResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::admin_login,
        crate::modules::auth::controller::farmer_login,
        crate::modules::auth::controller::change_admin_password,
        crate::modules::farmers::controller::register_farmer,
        crate::modules::farmers::controller::create_farmer,
        crate::modules::farmers::controller::list_farmers,
        crate::modules::farmers::controller::delete_farmer,
        crate::modules::farmers::controller::get_farmer,
        crate::modules::farmers::controller::farmer_history,
        crate::modules::farmers::controller::farmer_history_pdf,
        crate::modules::work::controller::create_work,
        crate::modules::work::controller::update_work,
        crate::modules::work::controller::delete_work,
        crate::modules::work::controller::list_work,
        crate::modules::work::controller::my_work,
        crate::modules::payments::controller::create_payment,
        crate::modules::payments::controller::update_payment,
        crate::modules::payments::controller::delete_payment,
        crate::modules::payments::controller::farmer_ledger_history,
    ),
    components(
        schemas(
            Role,
            AdminLoginRequest,
            AdminLoginResponse,
            FarmerLoginRequest,
            FarmerLoginResponse,
            ChangePasswordRequest,
            SuccessResponse,
            ErrorResponse,
            Farmer,
            RegisterFarmerRequest,
            RegisterFarmerResponse,
            CreateFarmerResponse,
            FarmerListResponse,
            DeleteFarmerRequest,
            WorkRecord,
            CreateWorkRequest,
            UpdateWorkRequest,
            WorkResponse,
            WorkListResponse,
            Payment,
            CreatePaymentRequest,
            UpdatePaymentRequest,
            PaymentResponse,
            HistoryResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and password management"),
        (name = "Farmers", description = "Farmer accounts and history"),
        (name = "Work", description = "Labor session ledger"),
        (name = "Payments", description = "Payment ledger")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
