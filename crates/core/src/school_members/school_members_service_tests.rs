#[cfg(test)]
mod tests {
    use crate::errors::Error;
    use crate::school_members::{NewSchoolMember, SchoolMemberRole, SchoolMemberServiceTrait};
    use crate::schools::{NewSchool, SchoolRegion, SchoolRepositoryTrait, SchoolServiceTrait};
    use crate::test_support::TestApp;
    use crate::users::{NewUser, UserRepositoryTrait, UserRole, UserServiceTrait};
    use crate::utils::Page;

    async fn user(app: &TestApp, name: &str, role: UserRole) -> String {
        app.users
            .create_user(NewUser {
                name: name.to_string(),
                role,
            })
            .await
            .unwrap()
            .id
    }

    async fn school(app: &TestApp, teacher_id: &str, name: &str) -> String {
        app.schools
            .create_school(NewSchool {
                user_id: teacher_id.to_string(),
                name: name.to_string(),
                region: SchoolRegion::Seoul,
                nickname: "principal".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn join_request(user_id: &str, school_id: &str) -> NewSchoolMember {
        NewSchoolMember {
            user_id: user_id.to_string(),
            school_id: school_id.to_string(),
            nickname: "student".to_string(),
            role: SchoolMemberRole::Student,
        }
    }

    #[tokio::test]
    async fn test_school_creator_is_enrolled_as_teacher() {
        let app = TestApp::new();
        let teacher = user(&app, "T", UserRole::Teacher).await;
        let school_id = school(&app, &teacher, "Hanbit").await;

        let member = app.members.get_membership(&teacher, &school_id).unwrap();
        assert_eq!(member.role, SchoolMemberRole::Teacher);
        assert_eq!(member.nickname, "principal");
        assert_eq!(app.store.all_members().len(), 1);
    }

    #[tokio::test]
    async fn test_join_twice_is_already_joined() {
        let app = TestApp::new();
        let teacher = user(&app, "T", UserRole::Teacher).await;
        let student = user(&app, "S", UserRole::Student).await;
        let school_id = school(&app, &teacher, "Hanbit").await;

        app.members
            .join(join_request(&student, &school_id))
            .await
            .unwrap();
        let err = app
            .members
            .join(join_request(&student, &school_id))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::AlreadyJoined { .. }));
    }

    #[tokio::test]
    async fn test_leave_then_rejoin_creates_a_new_row() {
        let app = TestApp::new();
        let teacher = user(&app, "T", UserRole::Teacher).await;
        let student = user(&app, "S", UserRole::Student).await;
        let school_id = school(&app, &teacher, "Hanbit").await;

        let first = app
            .members
            .join(join_request(&student, &school_id))
            .await
            .unwrap();
        let left = app.members.leave(&first.id).await.unwrap();
        assert!(!left.is_active());

        let second = app
            .members
            .join(join_request(&student, &school_id))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);

        // Leaving an already-left row
        let err = app.members.leave(&first.id).await.unwrap_err();
        assert!(matches!(err, Error::MemberNotFound(_)));
    }

    #[tokio::test]
    async fn test_leave_school_by_user() {
        let app = TestApp::new();
        let teacher = user(&app, "T", UserRole::Teacher).await;
        let student = user(&app, "S", UserRole::Student).await;
        let school_id = school(&app, &teacher, "Hanbit").await;

        let err = app
            .members
            .leave_school(&school_id, &student)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "MEMBER_NOT_FOUND");

        let joined = app
            .members
            .join(join_request(&student, &school_id))
            .await
            .unwrap();
        let left = app.members.leave_school(&school_id, &student).await.unwrap();
        assert_eq!(left.id, joined.id);
        assert!(app.members.get_membership(&student, &school_id).is_err());
    }

    #[tokio::test]
    async fn test_join_requires_active_school_and_user() {
        let app = TestApp::new();
        let teacher = user(&app, "T", UserRole::Teacher).await;
        let student = user(&app, "S", UserRole::Student).await;
        let school_id = school(&app, &teacher, "Hanbit").await;

        let err = app
            .members
            .join(join_request("ghost", &school_id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "USER_NOT_FOUND");

        SchoolRepositoryTrait::soft_delete(app.store.as_ref(), &school_id)
            .await
            .unwrap();
        let err = app
            .members
            .join(join_request(&student, &school_id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "SCHOOL_NOT_FOUND");

        UserRepositoryTrait::soft_delete(app.store.as_ref(), &student)
            .await
            .unwrap();
        assert!(app.users.get_user(&student).is_err());
    }

    #[tokio::test]
    async fn test_subscriptions_newest_first_skipping_deleted_schools() {
        let app = TestApp::new();
        let teacher = user(&app, "T", UserRole::Teacher).await;
        let student = user(&app, "S", UserRole::Student).await;
        let first = school(&app, &teacher, "First").await;
        let second = school(&app, &teacher, "Second").await;
        let third = school(&app, &teacher, "Third").await;

        for school_id in [&first, &second, &third] {
            app.members
                .join(join_request(&student, school_id))
                .await
                .unwrap();
        }
        SchoolRepositoryTrait::soft_delete(app.store.as_ref(), &second)
            .await
            .unwrap();

        let page = app
            .members
            .get_subscriptions(&student, Page::default())
            .unwrap();
        assert_eq!(page.total, 2);
        let names: Vec<_> = page.list.iter().map(|s| s.school_name.as_str()).collect();
        assert_eq!(names, vec!["Third", "First"]);
        assert_eq!(page.list[0].region, SchoolRegion::Seoul);
        assert_eq!(page.list[0].role, SchoolMemberRole::Student);

        let second_page = app
            .members
            .get_subscriptions(&student, Page::new(2, 1).unwrap())
            .unwrap();
        assert_eq!(second_page.total, 2);
        assert_eq!(second_page.list.len(), 1);
        assert_eq!(second_page.list[0].school_name, "First");
    }
}
