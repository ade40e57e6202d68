use crate::error::{Error, Result};
use crate::models::Task;

/// Ordered task list. Position is identity; oldest first.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add(&mut self, description: &str) -> Result<Task> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }
        let task = Task::new(description);
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub fn toggle_complete(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        Ok(task.clone())
    }

    pub fn delete(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Removes everything. An empty result means there was nothing to clear.
    pub fn clear_all(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }

    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }
}
