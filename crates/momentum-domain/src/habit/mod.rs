mod aggregate;
mod repository;


pub use aggregate::Habit;
pub use repository::HabitRepository;
