// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static course catalog.
//!
//! The catalog is built once at startup and never mutated.

use crate::models::{Course, Lesson};

/// Immutable list of courses.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// The four built-in courses.
    pub fn builtin() -> Self {
        Self::new(vec![
            course(
                1,
                "Introduction to Web Development",
                "Learn the fundamentals of HTML, CSS, and JavaScript",
                "John Doe",
                "4 weeks",
                "Beginner",
                "https://placehold.co/300x200/4CAF50/ffffff?text=Web+Dev",
                &[
                    ("HTML Basics", "30 min"),
                    ("CSS Fundamentals", "45 min"),
                    ("JavaScript Introduction", "60 min"),
                    ("Building Your First Website", "90 min"),
                ],
            ),
            course(
                2,
                "Python for Data Science",
                "Master Python programming and data analysis with pandas and NumPy",
                "Jane Smith",
                "6 weeks",
                "Intermediate",
                "https://placehold.co/300x200/2196F3/ffffff?text=Python+Data",
                &[
                    ("Python Basics", "40 min"),
                    ("NumPy Arrays", "50 min"),
                    ("Pandas DataFrames", "60 min"),
                    ("Data Visualization", "55 min"),
                    ("Real-world Project", "120 min"),
                ],
            ),
            course(
                3,
                "UI/UX Design Fundamentals",
                "Create beautiful and user-friendly interfaces",
                "Mike Johnson",
                "5 weeks",
                "Beginner",
                "https://placehold.co/300x200/FF9800/ffffff?text=UI+UX+Design",
                &[
                    ("Design Principles", "35 min"),
                    ("Color Theory", "40 min"),
                    ("Typography", "30 min"),
                    ("Wireframing", "50 min"),
                    ("Prototyping in Figma", "70 min"),
                ],
            ),
            course(
                4,
                "React JS Masterclass",
                "Build modern web applications with React and hooks",
                "Sarah Williams",
                "8 weeks",
                "Advanced",
                "https://placehold.co/300x200/9C27B0/ffffff?text=React+JS",
                &[
                    ("React Basics", "45 min"),
                    ("Components and Props", "50 min"),
                    ("State and Lifecycle", "55 min"),
                    ("Hooks Deep Dive", "75 min"),
                    ("Context API", "60 min"),
                    ("Building a Full App", "150 min"),
                ],
            ),
        ])
    }

    pub fn all(&self) -> &[Course] {
        &self.courses
    }

    pub fn find(&self, id: u32) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn course(
    id: u32,
    title: &str,
    description: &str,
    instructor: &str,
    duration: &str,
    level: &str,
    thumbnail: &str,
    lessons: &[(&str, &str)],
) -> Course {
    Course {
        id,
        title: title.to_string(),
        description: description.to_string(),
        instructor: instructor.to_string(),
        duration: duration.to_string(),
        level: level.to_string(),
        thumbnail: thumbnail.to_string(),
        lessons: lessons
            .iter()
            .zip(1..)
            .map(|((title, duration), id)| Lesson {
                id,
                title: title.to_string(),
                duration: duration.to_string(),
            })
            .collect(),
    }
}
