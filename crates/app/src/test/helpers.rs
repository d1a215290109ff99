//! Test Helpers

use jiff::civil::DateTime;
use waybill::{
    fleet::{Driver, DriverId, PickUpPoint, PickUpPointId, Worker, WorkerId},
    products::{Product, ProductId, ProductStatus},
    supplies::{Supply, SupplyId},
    users::{Role, User, UserId},
};

pub(crate) fn user(id: i64, role: Role) -> User {
    User {
        id: UserId::new(id),
        age: 30,
        login: format!("user{id}"),
        password: String::new(),
        name: format!("Name{id}"),
        surname: format!("Surname{id}"),
        last_name: String::new(),
        phone_number: format!("+7000000{id:04}"),
        region: 77,
        role,
    }
}

pub(crate) fn driver(id: i64, user: i64) -> Driver {
    Driver {
        id: DriverId::new(id),
        car_id: None,
        user_id: UserId::new(user),
    }
}

pub(crate) fn worker(id: i64, user: i64, point: Option<i64>) -> Worker {
    Worker {
        id: WorkerId::new(id),
        pick_up_point_id: point.map(PickUpPointId::new),
        user_id: UserId::new(user),
    }
}

pub(crate) fn point(id: i64, address: &str, region: i64) -> PickUpPoint {
    PickUpPoint {
        id: PickUpPointId::new(id),
        address: address.to_string(),
        region,
    }
}

pub(crate) fn supply(id: i64, driver: i64, point: i64, time: DateTime) -> Supply {
    Supply {
        id: SupplyId::new(id),
        driver_id: Some(DriverId::new(driver)),
        pick_up_point_id: PickUpPointId::new(point),
        time,
        ready: false,
    }
}

pub(crate) fn product(id: i64, supply: Option<i64>, status: ProductStatus) -> Product {
    Product {
        id: ProductId::new(id),
        articul: format!("ART-{id}"),
        discr: format!("Product {id}"),
        pick_up_point_id: Some(PickUpPointId::new(1)),
        supply_id: supply.map(SupplyId::new),
        status,
    }
}
