//! Static reference data compiled into the portal.
//!
//! Users, products, pharmacies and vendors never change at runtime; every
//! lookup borrows from the lazily built tables below.

use once_cell::sync::Lazy;

use crate::models::{Pharmacy, Product, ProductLine, Role, User, Vendor};

pub static USERS: Lazy<Vec<User>> = Lazy::new(|| {
    vec![
        manager("nsm001", "Ahmed Hassan", Role::Nsm, "Cairo", None, None),
        manager("nsm002", "Fatma Ali", Role::Nsm, "Alexandria", None, None),
        manager(
            "dsm001",
            "Mohamed Saeed",
            Role::Dsm,
            "Cairo",
            Some("Nasr City"),
            Some("nsm001"),
        ),
        manager(
            "dsm002",
            "Sara Ahmed",
            Role::Dsm,
            "Cairo",
            Some("Heliopolis"),
            Some("nsm001"),
        ),
        manager(
            "dsm003",
            "Omar Khaled",
            Role::Dsm,
            "Alexandria",
            Some("Smouha"),
            Some("nsm002"),
        ),
        manager(
            "dsm004",
            "Nour Hassan",
            Role::Dsm,
            "Alexandria",
            Some("Stanley"),
            Some("nsm002"),
        ),
        staff("admin", "System Admin", Role::Admin),
        staff("hr001", "HR Manager", Role::Hr),
    ]
});

pub static PRODUCTS: Lazy<Vec<Product>> = Lazy::new(|| {
    [
        ("cv001", "CardioMax 10mg", ProductLine::Cardiovascular),
        ("cv002", "HeartGuard 5mg", ProductLine::Cardiovascular),
        ("db001", "DiabetesControl 500mg", ProductLine::Diabetes),
        ("db002", "GlucoSafe 1000mg", ProductLine::Diabetes),
        ("on001", "OncoShield 25mg", ProductLine::Oncology),
        ("rs001", "BreathEasy 200mcg", ProductLine::Respiratory),
        ("nr001", "NeuroProtect 10mg", ProductLine::Neurology),
    ]
    .into_iter()
    .map(|(id, name, line)| Product {
        product_id: id.to_string(),
        product_name: name.to_string(),
        line,
    })
    .collect()
});

pub static PHARMACIES: Lazy<Vec<Pharmacy>> = Lazy::new(|| {
    [
        ("ph001", "Al-Shifa Pharmacy"),
        ("ph002", "Nour Pharmacy"),
        ("ph003", "Seif Pharmacy"),
        ("ph004", "Misr Pharmacy"),
        ("ph005", "El-Ezaby Pharmacy"),
    ]
    .into_iter()
    .map(|(id, name)| Pharmacy {
        pharmacy_id: id.to_string(),
        pharmacy_name: name.to_string(),
    })
    .collect()
});

pub static VENDORS: Lazy<Vec<Vendor>> = Lazy::new(|| {
    [
        ("v001", "MedSupply Egypt"),
        ("v002", "PharmaLogistics"),
        ("v003", "HealthTech Solutions"),
        ("v004", "BioMed Services"),
    ]
    .into_iter()
    .map(|(id, name)| Vendor {
        vendor_id: id.to_string(),
        vendor_name: name.to_string(),
    })
    .collect()
});

fn manager(
    id: &str,
    name: &str,
    role: Role,
    region: &str,
    territory: Option<&str>,
    parent: Option<&str>,
) -> User {
    User {
        user_id: id.to_string(),
        user_name: name.to_string(),
        role,
        region: Some(region.to_string()),
        territory: territory.map(str::to_string),
        parent_id: parent.map(str::to_string),
    }
}

fn staff(id: &str, name: &str, role: Role) -> User {
    User {
        user_id: id.to_string(),
        user_name: name.to_string(),
        role,
        region: None,
        territory: None,
        parent_id: None,
    }
}

pub fn find_user(user_id: &str) -> Option<&'static User> {
    USERS.iter().find(|user| user.user_id == user_id)
}

pub fn users_with_role(role: Role) -> impl Iterator<Item = &'static User> {
    USERS.iter().filter(move |user| user.role == role)
}

/// Users reporting directly to `manager_id`.
pub fn direct_reports(manager_id: &str) -> Vec<&'static User> {
    USERS
        .iter()
        .filter(|user| user.parent_id.as_deref() == Some(manager_id))
        .collect()
}

pub fn find_product(product_id: &str) -> Option<&'static Product> {
    PRODUCTS
        .iter()
        .find(|product| product.product_id == product_id)
}

pub fn find_pharmacy(pharmacy_id: &str) -> Option<&'static Pharmacy> {
    PHARMACIES
        .iter()
        .find(|pharmacy| pharmacy.pharmacy_id == pharmacy_id)
}

pub fn find_vendor(vendor_id: &str) -> Option<&'static Vendor> {
    VENDORS.iter().find(|vendor| vendor.vendor_id == vendor_id)
}

#[derive(Clone, Debug)]
pub struct LoginGroup {
    pub label: &'static str,
    pub users: Vec<LoginOption>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginOption {
    pub user_id: String,
    pub label: String,
}

/// Groups shown in the login selector: national managers, district managers,
/// then admin and HR accounts.
pub fn login_groups() -> Vec<LoginGroup> {
    let describe = |user: &User, location: Option<&String>| LoginOption {
        user_id: user.user_id.clone(),
        label: match location {
            Some(place) => format!("{} ({} - {})", user.user_name, user.role.label(), place),
            None => user.user_name.clone(),
        },
    };

    vec![
        LoginGroup {
            label: "NSM - National Sales Managers",
            users: users_with_role(Role::Nsm)
                .map(|user| describe(user, user.region.as_ref()))
                .collect(),
        },
        LoginGroup {
            label: "DSM - District Sales Managers",
            users: users_with_role(Role::Dsm)
                .map(|user| describe(user, user.territory.as_ref()))
                .collect(),
        },
        LoginGroup {
            label: "Admin Users",
            users: USERS
                .iter()
                .filter(|user| matches!(user.role, Role::Admin | Role::Hr))
                .map(|user| describe(user, None))
                .collect(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_find_seeded_records() {
        assert_eq!(find_user("dsm003").map(|u| u.user_name.as_str()), Some("Omar Khaled"));
        assert!(find_user("ghost").is_none());
        assert_eq!(
            find_product("db002").map(|p| p.line),
            Some(ProductLine::Diabetes)
        );
        assert_eq!(
            find_pharmacy("ph005").map(|p| p.pharmacy_name.as_str()),
            Some("El-Ezaby Pharmacy")
        );
        assert_eq!(
            find_vendor("v003").map(|v| v.vendor_name.as_str()),
            Some("HealthTech Solutions")
        );
    }

    #[test]
    fn reporting_tree_has_two_districts_per_national_manager() {
        let cairo: Vec<_> = direct_reports("nsm001")
            .into_iter()
            .map(|user| user.user_id.as_str())
            .collect();
        assert_eq!(cairo, vec!["dsm001", "dsm002"]);
        assert_eq!(direct_reports("nsm002").len(), 2);
        assert!(direct_reports("dsm001").is_empty());
    }

    #[test]
    fn login_groups_label_users_by_location() {
        let groups = login_groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].users[0].label, "Ahmed Hassan (NSM - Cairo)");
        assert_eq!(groups[1].users[1].label, "Sara Ahmed (DSM - Heliopolis)");
        let admin_ids: Vec<_> = groups[2].users.iter().map(|o| o.user_id.as_str()).collect();
        assert_eq!(admin_ids, vec!["admin", "hr001"]);
    }
}
