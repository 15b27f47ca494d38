//! Shared primitive types used across the whole analytics core.

/// A stable, unique identifier for an employee.
pub type EmployeeId = String;

/// A skill identifier, unique per employee.
pub type SkillId = String;

/// A role identifier as carried on the raw record.
pub type RoleId = String;

/// ISO-4217 style currency code.
pub type CurrencyCode = String;
