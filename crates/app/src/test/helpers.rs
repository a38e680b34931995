//! Test Helpers

use std::error::Error;

use crate::{
    auth::{AuthService, NewAdmin, Registration},
    domain::{
        products::{
            ProductsService,
            data::ProductDetails,
            records::{Category, ProductRecord},
        },
        users::records::{Role, UserRecord},
        vendors::{
            VendorsService,
            data::VendorProfile,
            records::{Address, BusinessType, VendorRecord, VendorUuid},
        },
    },
    test::TestContext,
};

type HelperResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

const PASSWORD: &str = "correct-horse";

/// Sign up an account with the given role. Admins go through the bootstrap path.
pub(crate) async fn register_user(
    ctx: &TestContext,
    email: &str,
    role: Role,
) -> HelperResult<UserRecord> {
    let name = email.split('@').next().unwrap_or(email).to_string();

    let authenticated = if role == Role::Admin {
        ctx.auth
            .create_admin(NewAdmin {
                name,
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await?
    } else {
        ctx.auth
            .register(Registration {
                name,
                email: email.to_string(),
                password: PASSWORD.to_string(),
                phone: None,
                role,
            })
            .await?
    };

    Ok(authenticated.user)
}

pub(crate) fn vendor_profile(business_name: &str) -> VendorProfile {
    VendorProfile {
        business_name: business_name.to_string(),
        description: "Neighbourhood store".to_string(),
        business_type: BusinessType::Grocery,
        address: Address {
            street: "1 Station Road".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            pincode: "411001".to_string(),
        },
        contact_phone: "9800000000".to_string(),
        contact_email: "store@example.com".to_string(),
    }
}

/// A vendor-role account with a profile.
pub(crate) async fn create_vendor(
    ctx: &TestContext,
    email: &str,
) -> HelperResult<(UserRecord, VendorRecord)> {
    let user = register_user(ctx, email, Role::Vendor).await?;

    let vendor = ctx
        .vendors
        .create_profile(user.uuid, vendor_profile(email))
        .await?;

    Ok((user, vendor))
}

pub(crate) fn product_details(title: &str, price: u64) -> ProductDetails {
    ProductDetails {
        title: title.to_string(),
        description: format!("{title} from a local supplier"),
        short_description: String::new(),
        category: Category::Grocery,
        mrp: price,
        selling_price: price,
        stock: 10,
        unit: "piece".to_string(),
        tags: Vec::new(),
        images: Vec::new(),
        is_featured: false,
        is_active: true,
    }
}

/// List a product for `vendor`, acting as the vendor's owner.
pub(crate) async fn create_product(
    ctx: &TestContext,
    vendor: VendorUuid,
    title: &str,
    price: u64,
    stock: u32,
) -> HelperResult<ProductRecord> {
    let owner = ctx.vendors.get_vendor(vendor).await?.user_uuid;

    let product = ctx
        .products
        .create_product(
            owner,
            ProductDetails {
                stock,
                ..product_details(title, price)
            },
        )
        .await?;

    Ok(product)
}
