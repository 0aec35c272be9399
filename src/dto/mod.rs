pub mod console_dto;
