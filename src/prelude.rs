//! Waybill prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    fleet::{
        Car, CarId, Driver, DriverId, NewCar, NewPickUpPoint, PersonName, PickUpPoint,
        PickUpPointId, Staffed, Worker, WorkerId,
    },
    ids::TypedId,
    navigation::{Screen, screens_for},
    products::{NewProduct, Product, ProductFilter, ProductId, ProductStatus, TrackedProduct},
    render::Columns,
    reports::{ReportError, ReportFilter, ReportRow, ShiftReportRow, SupplyReportRow},
    shifts::{NewWorkingShift, ShiftClock, ShiftStatus, WorkingShift, WorkingShiftId},
    supplies::{
        Arrival, BoardEntry, ConfirmedSupplies, Destination, DriverContact, NewSupply, Supply,
        SupplyBoard, SupplyForm, SupplyId, SupplyStatus,
    },
    time::TimeError,
    users::{NewUser, Role, User, UserId},
    validation::ValidationError,
};
