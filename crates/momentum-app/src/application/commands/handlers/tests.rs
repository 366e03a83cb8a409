use std::collections::HashMap;
use std::sync::Arc;

use crate::application::commands::auth_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use crate::application::commands::handlers::*;
use crate::application::commands::project_commands::*;
use crate::application::services::DailyResetService;
use momentum_domain::completion::{reset_daily, CompletionDate};
use momentum_domain::habit::{Habit, HabitRepository};
use momentum_domain::project::{PhaseStatus, Project, ProjectRepository, WorkSchedule};
use momentum_domain::shared::{Clock, DomainError, FixedClock, HabitId, ProjectId, UserId};
use momentum_domain::user::{User, UserRepository};
use momentum_infrastructure::security::JwtService;

// Mock repositories and services for testing

struct MockUserRepository {
    users: tokio::sync::RwLock<HashMap<String, User>>,
}

impl MockUserRepository {
    fn new() -> Self {
        Self {
            users: tokio::sync::RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.username().eq_ignore_ascii_case(user.username()))
        {
            return Err(DomainError::Conflict(user.username().to_string()));
        }
        users.insert(user.id().as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id.as_str()).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username().eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn find_all_ids(&self) -> Result<Vec<UserId>, DomainError> {
        Ok(self.users.read().await.values().map(|u| u.id().clone()).collect())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        Ok(self.users.write().await.remove(id.as_str()).is_some())
    }
}

struct MockHabitRepository {
    habits: tokio::sync::RwLock<HashMap<String, Habit>>,
    save_count: tokio::sync::RwLock<usize>,
}

impl MockHabitRepository {
    fn new() -> Self {
        Self {
            habits: tokio::sync::RwLock::new(HashMap::new()),
            save_count: tokio::sync::RwLock::new(0),
        }
    }

    async fn get_save_count(&self) -> usize {
        *self.save_count.read().await
    }
}

#[async_trait::async_trait]
impl HabitRepository for MockHabitRepository {
    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &HabitId,
    ) -> Result<Option<Habit>, DomainError> {
        let habits = self.habits.read().await;
        Ok(habits
            .get(id.as_str())
            .filter(|h| h.is_owned_by(user_id))
            .cloned())
    }

    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Habit>, DomainError> {
        let habits = self.habits.read().await;
        Ok(habits
            .values()
            .filter(|h| h.is_owned_by(user_id))
            .cloned()
            .collect())
    }

    async fn save(&self, habit: &Habit) -> Result<(), DomainError> {
        self.habits
            .write()
            .await
            .insert(habit.id().as_str().to_string(), habit.clone());
        *self.save_count.write().await += 1;
        Ok(())
    }

    async fn save_all(&self, habits: &[Habit]) -> Result<(), DomainError> {
        let mut stored = self.habits.write().await;
        for habit in habits {
            stored.insert(habit.id().as_str().to_string(), habit.clone());
        }
        *self.save_count.write().await += 1;
        Ok(())
    }

    async fn reset_completed_for_user(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let mut habits = self.habits.write().await;
        let owned: Vec<Habit> = habits
            .values()
            .filter(|h| h.is_owned_by(user_id))
            .cloned()
            .collect();
        let count = owned.len();
        for habit in reset_daily(owned) {
            habits.insert(habit.id().as_str().to_string(), habit);
        }
        Ok(count)
    }

    async fn delete(&self, user_id: &UserId, id: &HabitId) -> Result<bool, DomainError> {
        let mut habits = self.habits.write().await;
        match habits.get(id.as_str()) {
            Some(h) if h.is_owned_by(user_id) => {
                habits.remove(id.as_str());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

struct MockProjectRepository {
    projects: tokio::sync::RwLock<HashMap<String, Project>>,
}

impl MockProjectRepository {
    fn new() -> Self {
        Self {
            projects: tokio::sync::RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl ProjectRepository for MockProjectRepository {
    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &ProjectId,
    ) -> Result<Option<Project>, DomainError> {
        let projects = self.projects.read().await;
        Ok(projects
            .get(id.as_str())
            .filter(|p| p.user_id() == user_id)
            .cloned())
    }

    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Project>, DomainError> {
        let projects = self.projects.read().await;
        Ok(projects
            .values()
            .filter(|p| p.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        self.projects
            .write()
            .await
            .insert(project.id().as_str().to_string(), project.clone());
        Ok(())
    }

    async fn save_all(&self, projects: &[Project]) -> Result<(), DomainError> {
        let mut stored = self.projects.write().await;
        for project in projects {
            stored.insert(project.id().as_str().to_string(), project.clone());
        }
        Ok(())
    }

    async fn reset_completed_for_user(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let mut projects = self.projects.write().await;
        let owned: Vec<Project> = projects
            .values()
            .filter(|p| p.user_id() == user_id)
            .cloned()
            .collect();
        let count = owned.len();
        for project in reset_daily(owned) {
            projects.insert(project.id().as_str().to_string(), project);
        }
        Ok(count)
    }

    async fn delete(&self, user_id: &UserId, id: &ProjectId) -> Result<bool, DomainError> {
        let mut projects = self.projects.write().await;
        match projects.get(id.as_str()) {
            Some(p) if p.user_id() == user_id => {
                projects.remove(id.as_str());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

mockall::mock! {
    pub HabitRepo {}

    #[async_trait::async_trait]
    impl HabitRepository for HabitRepo {
        async fn find_by_id(&self, user_id: &UserId, id: &HabitId) -> Result<Option<Habit>, DomainError>;
        async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Habit>, DomainError>;
        async fn save(&self, habit: &Habit) -> Result<(), DomainError>;
        async fn save_all(&self, habits: &[Habit]) -> Result<(), DomainError>;
        async fn reset_completed_for_user(&self, user_id: &UserId) -> Result<usize, DomainError>;
        async fn delete(&self, user_id: &UserId, id: &HabitId) -> Result<bool, DomainError>;
    }
}

fn day(s: &str) -> CompletionDate {
    s.parse().unwrap()
}

fn clock_at(s: &str) -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(day(s)))
}

fn jwt() -> Arc<JwtService> {
    Arc::new(JwtService::new("test-secret-that-is-long-enough-1234", 1).unwrap())
}

async fn seeded_habit(repo: &MockHabitRepository, user_id: &UserId, name: &str) -> HabitId {
    let habit = Habit::new(user_id.clone(), name.to_string(), None).unwrap();
    let id = habit.id().clone();
    repo.save(&habit).await.unwrap();
    id
}

// Tests

#[tokio::test]
async fn test_register_then_login() {
    let repo = Arc::new(MockUserRepository::new());
    let register = RegisterUserCommandHandler::new(repo.clone(), jwt());
    let login = LoginCommandHandler::new(repo.clone(), jwt());

    let registered = register
        .handle(RegisterUserCommand {
            username: "  alice ".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(registered.user.username, "alice");
    assert!(!registered.token.is_empty());

    let stored = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_ne!(stored.password_hash(), "correct horse");

    let logged_in = login
        .handle(LoginCommand {
            username: "alice".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);

    let claims = jwt().verify(&logged_in.token).unwrap();
    assert_eq!(claims.sub, registered.user.id);
}

#[tokio::test]
async fn test_register_rejects_taken_username_and_short_password() {
    let repo = Arc::new(MockUserRepository::new());
    let handler = RegisterUserCommandHandler::new(repo.clone(), jwt());

    handler
        .handle(RegisterUserCommand {
            username: "bob".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();

    let taken = handler
        .handle(RegisterUserCommand {
            username: "BOB".to_string(),
            password: "password123".to_string(),
        })
        .await;
    assert!(matches!(taken, Err(DomainError::Conflict(_))));

    let short = handler
        .handle(RegisterUserCommand {
            username: "carol".to_string(),
            password: "short".to_string(),
        })
        .await;
    assert!(matches!(short, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_login_with_wrong_password_or_unknown_user() {
    let repo = Arc::new(MockUserRepository::new());
    RegisterUserCommandHandler::new(repo.clone(), jwt())
        .handle(RegisterUserCommand {
            username: "dave".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
    let login = LoginCommandHandler::new(repo, jwt());

    let wrong = login
        .handle(LoginCommand {
            username: "dave".to_string(),
            password: "password124".to_string(),
        })
        .await;
    assert!(matches!(wrong, Err(DomainError::InvalidCredentials(_))));

    let unknown = login
        .handle(LoginCommand {
            username: "erin".to_string(),
            password: "password123".to_string(),
        })
        .await;
    assert!(matches!(unknown, Err(DomainError::InvalidCredentials(_))));
}

#[tokio::test]
async fn test_create_and_update_habit() {
    let repo = Arc::new(MockHabitRepository::new());
    let clock = clock_at("2024-06-01");
    let user = UserId::new();

    let created = CreateHabitCommandHandler::new(repo.clone(), clock.clone())
        .handle(CreateHabitCommand {
            user_id: user.clone(),
            name: " Read ".to_string(),
            description: Some("20 pages".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Read");
    assert!(!created.completed);
    assert_eq!(created.streak, 0);
    assert!(created.completion_history.is_empty());

    let updated = UpdateHabitCommandHandler::new(repo.clone(), clock)
        .handle(UpdateHabitCommand {
            user_id: user.clone(),
            habit_id: HabitId::from_string(&created.id),
            name: Some("Read books".to_string()),
            description: Some(None),
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Read books");
    assert_eq!(updated.description, None);

    let empty_name = CreateHabitCommandHandler::new(repo, clock_at("2024-06-01"))
        .handle(CreateHabitCommand {
            user_id: user,
            name: "   ".to_string(),
            description: None,
        })
        .await;
    assert!(matches!(empty_name, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_toggle_habit_three_times_same_day() {
    let repo = Arc::new(MockHabitRepository::new());
    let user = UserId::new();
    let habit_id = seeded_habit(&repo, &user, "Meditate").await;
    let handler = ToggleHabitCommandHandler::new(repo.clone(), clock_at("2024-06-01"));

    let command = ToggleHabitCommand {
        user_id: user.clone(),
        habit_id: habit_id.clone(),
    };

    let first = handler.handle(command.clone()).await.unwrap();
    assert!(first.completed);
    assert_eq!(first.streak, 1);

    let second = handler.handle(command.clone()).await.unwrap();
    assert!(!second.completed);
    assert_eq!(second.streak, 0);
    assert_eq!(
        serde_json::to_string(&second.completion_history).unwrap(),
        r#"[{"date":"2024-06-01","completed":false}]"#
    );

    let third = handler.handle(command).await.unwrap();
    assert!(third.completed);
    assert_eq!(third.streak, 1);

    // one save per toggle, plus the seed
    assert_eq!(repo.get_save_count().await, 4);
}

#[tokio::test]
async fn test_toggle_habit_across_days_builds_streak() {
    let repo = Arc::new(MockHabitRepository::new());
    let user = UserId::new();
    let habit_id = seeded_habit(&repo, &user, "Run").await;

    for (date, expected) in [("2024-06-01", 1), ("2024-06-02", 2), ("2024-06-03", 3)] {
        let toggled = ToggleHabitCommandHandler::new(repo.clone(), clock_at(date))
            .handle(ToggleHabitCommand {
                user_id: user.clone(),
                habit_id: habit_id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(toggled.streak, expected);

        ResetDailyHabitsCommandHandler::new(repo.clone())
            .handle(ResetDailyHabitsCommand {
                user_id: user.clone(),
            })
            .await
            .unwrap();
    }

    let habit = repo.find_by_id(&user, &habit_id).await.unwrap().unwrap();
    assert!(!habit.is_completed());
    assert_eq!(habit.streak(), 3);
}

#[tokio::test]
async fn test_toggle_foreign_or_missing_habit_is_not_found() {
    let repo = Arc::new(MockHabitRepository::new());
    let owner = UserId::new();
    let habit_id = seeded_habit(&repo, &owner, "Stretch").await;
    let handler = ToggleHabitCommandHandler::new(repo.clone(), clock_at("2024-06-01"));

    let foreign = handler
        .handle(ToggleHabitCommand {
            user_id: UserId::new(),
            habit_id: habit_id.clone(),
        })
        .await;
    assert!(matches!(foreign, Err(DomainError::HabitNotFound(_))));

    let missing = handler
        .handle(ToggleHabitCommand {
            user_id: owner.clone(),
            habit_id: HabitId::new(),
        })
        .await;
    assert!(matches!(missing, Err(DomainError::HabitNotFound(_))));

    let untouched = repo.find_by_id(&owner, &habit_id).await.unwrap().unwrap();
    assert!(!untouched.is_completed());
}

#[tokio::test]
async fn test_toggle_propagates_save_failure() {
    let habit = Habit::new(UserId::new(), "Journal".to_string(), None).unwrap();
    let user_id = habit.user_id().clone();
    let habit_id = habit.id().clone();

    let mut repo = MockHabitRepo::new();
    repo.expect_find_by_id()
        .times(1)
        .returning(move |_, _| Ok(Some(habit.clone())));
    repo.expect_save()
        .times(1)
        .withf(|h| h.is_completed() && h.streak() == 1)
        .returning(|_| Err(DomainError::Repository("disk full".to_string())));

    let handler = ToggleHabitCommandHandler::new(Arc::new(repo), clock_at("2024-06-01"));
    let result = handler
        .handle(ToggleHabitCommand { user_id, habit_id })
        .await;

    assert!(matches!(result, Err(DomainError::Repository(msg)) if msg == "disk full"));
}

#[tokio::test]
async fn test_reset_daily_habits_never_rewrites_rows() {
    let mut repo = MockHabitRepo::new();
    let user = UserId::new();
    let expected = user.clone();

    repo.expect_find_all_for_user().times(0);
    repo.expect_save_all().times(0);
    repo.expect_save().times(0);
    repo.expect_reset_completed_for_user()
        .times(1)
        .withf(move |id| *id == expected)
        .returning(|_| Ok(3));

    let result = ResetDailyHabitsCommandHandler::new(Arc::new(repo))
        .handle(ResetDailyHabitsCommand { user_id: user })
        .await
        .unwrap();
    assert_eq!(result.reset_count, 3);
}

#[tokio::test]
async fn test_delete_habit() {
    let repo = Arc::new(MockHabitRepository::new());
    let user = UserId::new();
    let habit_id = seeded_habit(&repo, &user, "Floss").await;
    let handler = DeleteHabitCommandHandler::new(repo.clone());

    let foreign = handler
        .handle(DeleteHabitCommand {
            user_id: UserId::new(),
            habit_id: habit_id.clone(),
        })
        .await;
    assert!(matches!(foreign, Err(DomainError::HabitNotFound(_))));

    handler
        .handle(DeleteHabitCommand {
            user_id: user.clone(),
            habit_id: habit_id.clone(),
        })
        .await
        .unwrap();
    assert!(repo.find_by_id(&user, &habit_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_project_lifecycle() {
    let repo = Arc::new(MockProjectRepository::new());
    let clock = clock_at("2024-06-03");
    let user = UserId::new();

    let created = CreateProjectCommandHandler::new(repo.clone())
        .handle(CreateProjectCommand {
            user_id: user.clone(),
            name: "Novel".to_string(),
            description: None,
            mvg_description: Some("Write 100 words".to_string()),
        })
        .await
        .unwrap();
    let project_id = ProjectId::from_string(&created.id);
    assert_eq!(created.progress, 0.0);
    assert_eq!(created.mvg.description.as_deref(), Some("Write 100 words"));

    let add = AddPhaseCommandHandler::new(repo.clone());
    for name in ["Outline", "Draft"] {
        add.handle(AddPhaseCommand {
            user_id: user.clone(),
            project_id: project_id.clone(),
            name: name.to_string(),
            due_date: None,
        })
        .await
        .unwrap();
    }

    let stored = repo.find_by_id(&user, &project_id).await.unwrap().unwrap();
    let outline = stored.phases()[0].id().clone();

    let updated = UpdatePhaseCommandHandler::new(repo.clone())
        .handle(UpdatePhaseCommand {
            user_id: user.clone(),
            project_id: project_id.clone(),
            phase_id: outline.clone(),
            name: None,
            status: Some(PhaseStatus::Done),
            position: Some(1),
            due_date: None,
        })
        .await
        .unwrap();
    assert_eq!(updated.progress, 0.5);
    assert_eq!(updated.phases[1].name, "Outline");
    assert_eq!(updated.phases[0].position, 0);

    let toggled = ToggleProjectMvgCommandHandler::new(repo.clone(), clock.clone())
        .handle(ToggleProjectMvgCommand {
            user_id: user.clone(),
            project_id: project_id.clone(),
        })
        .await
        .unwrap();
    assert!(toggled.mvg.completed);
    assert_eq!(toggled.mvg.streak, 1);

    let recorded = RecordWorkSessionCommandHandler::new(repo.clone(), clock)
        .handle(RecordWorkSessionCommand {
            user_id: user.clone(),
            project_id: project_id.clone(),
            date: None,
            completed: true,
            notes: Some("Chapter one".to_string()),
        })
        .await
        .unwrap();
    let session = recorded.session_log.find_by_date(day("2024-06-03")).unwrap();
    assert_eq!(session.notes.as_deref(), Some("Chapter one"));

    let removed = RemovePhaseCommandHandler::new(repo.clone())
        .handle(RemovePhaseCommand {
            user_id: user.clone(),
            project_id: project_id.clone(),
            phase_id: outline,
        })
        .await
        .unwrap();
    assert_eq!(removed.phases.len(), 1);
    assert_eq!(removed.progress, 0.0);
}

#[tokio::test]
async fn test_set_schedule_and_reset_mvgs() {
    let repo = Arc::new(MockProjectRepository::new());
    let user = UserId::new();
    let project = Project::new(user.clone(), "Garden".to_string(), None, None).unwrap();
    let project_id = project.id().clone();
    repo.save(&project.toggle_mvg(day("2024-06-03"))).await.unwrap();

    let schedule = WorkSchedule::new(vec![chrono::Weekday::Mon], "07:30", 45).unwrap();
    let with_schedule = SetWorkScheduleCommandHandler::new(repo.clone())
        .handle(SetWorkScheduleCommand {
            user_id: user.clone(),
            project_id: project_id.clone(),
            schedule: Some(schedule),
        })
        .await
        .unwrap();
    assert_eq!(
        with_schedule.schedule.as_ref().map(|s| s.start_time().to_string()),
        Some("07:30".to_string())
    );

    let result = ResetDailyMvgsCommandHandler::new(repo.clone())
        .handle(ResetDailyMvgsCommand {
            user_id: user.clone(),
        })
        .await
        .unwrap();
    assert_eq!(result.reset_count, 1);

    let stored = repo.find_by_id(&user, &project_id).await.unwrap().unwrap();
    assert!(!stored.mvg().tracking.completed);
    assert_eq!(stored.mvg().tracking.streak, 1);
    assert!(stored.schedule().is_some());

    let cleared = SetWorkScheduleCommandHandler::new(repo.clone())
        .handle(SetWorkScheduleCommand {
            user_id: user,
            project_id,
            schedule: None,
        })
        .await
        .unwrap();
    assert!(cleared.schedule.is_none());
}

#[tokio::test]
async fn test_project_commands_respect_ownership() {
    let repo = Arc::new(MockProjectRepository::new());
    let owner = UserId::new();
    let project = Project::new(owner.clone(), "Secret".to_string(), None, None).unwrap();
    let project_id = project.id().clone();
    repo.save(&project).await.unwrap();

    let intruder = UserId::new();
    let toggle = ToggleProjectMvgCommandHandler::new(repo.clone(), clock_at("2024-06-01"))
        .handle(ToggleProjectMvgCommand {
            user_id: intruder.clone(),
            project_id: project_id.clone(),
        })
        .await;
    assert!(matches!(toggle, Err(DomainError::ProjectNotFound(_))));

    let delete = DeleteProjectCommandHandler::new(repo.clone())
        .handle(DeleteProjectCommand {
            user_id: intruder,
            project_id: project_id.clone(),
        })
        .await;
    assert!(matches!(delete, Err(DomainError::ProjectNotFound(_))));

    let phase = UpdatePhaseCommandHandler::new(repo.clone())
        .handle(UpdatePhaseCommand {
            user_id: owner.clone(),
            project_id,
            phase_id: momentum_domain::shared::PhaseId::new(),
            name: Some("x".to_string()),
            status: None,
            position: None,
            due_date: None,
        })
        .await;
    assert!(matches!(phase, Err(DomainError::PhaseNotFound(_))));
}

#[tokio::test]
async fn test_daily_reset_service_sweeps_every_user() {
    let users = Arc::new(MockUserRepository::new());
    let habits = Arc::new(MockHabitRepository::new());
    let projects = Arc::new(MockProjectRepository::new());

    let mut owners = Vec::new();
    for name in ["frank", "grace"] {
        let user = User::new(name, "hash".to_string()).unwrap();
        users.create(&user).await.unwrap();
        owners.push(user.id().clone());
    }

    for owner in &owners {
        let habit = Habit::new(owner.clone(), "Walk".to_string(), None).unwrap();
        habits
            .save(&momentum_domain::completion::toggle(habit, day("2024-06-01")))
            .await
            .unwrap();
    }
    let project = Project::new(owners[0].clone(), "Blog".to_string(), None, None).unwrap();
    projects
        .save(&project.toggle_mvg(day("2024-06-01")))
        .await
        .unwrap();

    let service = DailyResetService::new(users, habits.clone(), projects.clone());
    let report = service.run_once().await.unwrap();

    assert_eq!(report.users, 2);
    assert_eq!(report.habits_reset, 2);
    assert_eq!(report.projects_reset, 1);
    assert!(report.failures.is_empty());

    for owner in &owners {
        for habit in habits.find_all_for_user(owner).await.unwrap() {
            assert!(!habit.is_completed());
            assert_eq!(habit.streak(), 1);
        }
    }
    let stored = projects.find_all_for_user(&owners[0]).await.unwrap();
    assert!(!stored[0].mvg().tracking.completed);
}

#[tokio::test]
async fn test_daily_reset_service_continues_after_failure() {
    let users = Arc::new(MockUserRepository::new());
    for name in ["heidi", "ivan"] {
        users
            .create(&User::new(name, "hash".to_string()).unwrap())
            .await
            .unwrap();
    }

    let mut habits = MockHabitRepo::new();
    let mut calls = 0;
    habits
        .expect_reset_completed_for_user()
        .times(2)
        .returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(DomainError::Timeout("locked".to_string()))
            } else {
                Ok(0)
            }
        });

    let service = DailyResetService::new(
        users,
        Arc::new(habits),
        Arc::new(MockProjectRepository::new()),
    );
    let report = service.run_once().await.unwrap();

    assert_eq!(report.users, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.habits_reset, 0);
}
