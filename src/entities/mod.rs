pub mod todo_task;
