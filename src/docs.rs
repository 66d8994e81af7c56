//! OpenAPI description served at `/swagger-ui` and `/scalar`.
//!
//! The generic content panels (`/api/admin/{news,events,staff,...}`) share
//! one set of handlers and are described by their row and DTO schemas only.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use schoolhub_auth::AdminRole;
use schoolhub_core::{PaginationMeta, PaginationParams};
use schoolhub_models::about::{
    CreateFacilityDto, CreateMilestoneDto, Facility, Milestone, UpdateFacilityDto,
    UpdateMilestoneDto,
};
use schoolhub_models::admins::{AdminUser, LoginRequest, LoginResponse};
use schoolhub_models::admissions::{
    Admission, AdmissionStatus, AdmissionSummary, EnrollmentSubmitted,
    PaginatedAdmissionsResponse, UpdateAdmissionStatusDto,
};
use schoolhub_models::contact::{
    ContactMessage, ContactPage, CreateContactMessageDto, MarkReadDto,
    PaginatedContactMessagesResponse, UnreadCount,
};
use schoolhub_models::curriculum::{
    CreateCurriculumActivityDto, CreateCurriculumProgramDto, CurriculumActivity,
    CurriculumPage, CurriculumProgram, UpdateCurriculumActivityDto, UpdateCurriculumProgramDto,
};
use schoolhub_models::dashboard::{DashboardCounts, DashboardResponse, DashboardTab};
use schoolhub_models::enrollment::{
    AcademicInfo, Agreements, EnrollmentDraft, EnrollmentStep, Gender, GradeLevel, ParentInfo,
    StepResult, StudentInfo,
};
use schoolhub_models::events::{CreateEventDto, Event, UpdateEventDto};
use schoolhub_models::faqs::{CreateFaqDto, Faq, UpdateFaqDto};
use schoolhub_models::gallery::{
    AddPhotosDto, AlbumSummary, AlbumWithPhotos, BulkUploadResponse, CreateAlbumDto,
    GalleryAlbum, GalleryPhoto, RejectedUpload, UpdateAlbumDto, UpdatePhotoDto,
};
use schoolhub_models::news::{CreateNewsDto, News, UpdateNewsDto};
use schoolhub_models::people::{
    Administrator, CreateAdministratorDto, CreateStaffDto, Staff, UpdateAdministratorDto,
    UpdateStaffDto,
};
use schoolhub_models::settings::{
    SettingsResponse, SiteSettings, SocialLink, SocialPlatform, UpdateSettingsDto,
};
use schoolhub_models::students::{
    CreateStudentAchievementDto, CreateStudentActivityDto, StudentAchievement, StudentActivity,
    StudentsPage, UpdateStudentAchievementDto, UpdateStudentActivityDto,
};
use schoolhub_models::VisibilityDto;

use crate::modules::enrollment::model::{EnrollmentForm, ProgramOption, StepInfo};
use crate::modules::public::model::{
    AboutPage, CalendarMonth, HomePage, PaginatedNewsResponse, SiteStats,
};
use crate::modules::uploads::model::{DeleteUploadDto, UploadResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::public::controller::home,
        crate::modules::public::controller::about,
        crate::modules::public::controller::administrators,
        crate::modules::public::controller::staff,
        crate::modules::public::controller::students,
        crate::modules::public::controller::curriculum,
        crate::modules::public::controller::list_news,
        crate::modules::public::controller::get_news,
        crate::modules::public::controller::upcoming_events,
        crate::modules::public::controller::calendar,
        crate::modules::public::controller::contact_page,
        crate::modules::gallery::controller::list_public_albums,
        crate::modules::gallery::controller::get_public_album,
        crate::modules::settings::controller::get_public_settings,
        crate::modules::contact::controller::submit_message,
        crate::modules::enrollment::controller::enrollment_form,
        crate::modules::enrollment::controller::validate_step,
        crate::modules::enrollment::controller::submit_application,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::dashboard::controller::get_dashboard,
        crate::modules::gallery::controller::list_photos,
        crate::modules::gallery::controller::add_photos,
        crate::modules::gallery::controller::upload_photos,
        crate::modules::gallery::controller::update_photo,
        crate::modules::gallery::controller::delete_photo,
        crate::modules::admissions::controller::list_admissions,
        crate::modules::admissions::controller::admission_summary,
        crate::modules::admissions::controller::get_admission,
        crate::modules::admissions::controller::update_admission_status,
        crate::modules::admissions::controller::delete_admission,
        crate::modules::admissions::controller::print_admission,
        crate::modules::contact::controller::list_messages,
        crate::modules::contact::controller::unread_count,
        crate::modules::contact::controller::get_message,
        crate::modules::contact::controller::mark_read,
        crate::modules::contact::controller::delete_message,
        crate::modules::settings::controller::get_settings,
        crate::modules::settings::controller::update_settings,
        crate::modules::uploads::controller::upload_image,
        crate::modules::uploads::controller::delete_upload,
    ),
    components(
        schemas(
            AdminRole,
            AdminUser,
            LoginRequest,
            LoginResponse,
            PaginationMeta,
            PaginationParams,
            VisibilityDto,
            News,
            CreateNewsDto,
            UpdateNewsDto,
            Event,
            CreateEventDto,
            UpdateEventDto,
            Administrator,
            CreateAdministratorDto,
            UpdateAdministratorDto,
            Staff,
            CreateStaffDto,
            UpdateStaffDto,
            StudentAchievement,
            CreateStudentAchievementDto,
            UpdateStudentAchievementDto,
            StudentActivity,
            CreateStudentActivityDto,
            UpdateStudentActivityDto,
            StudentsPage,
            CurriculumProgram,
            CreateCurriculumProgramDto,
            UpdateCurriculumProgramDto,
            CurriculumActivity,
            CreateCurriculumActivityDto,
            UpdateCurriculumActivityDto,
            CurriculumPage,
            Facility,
            CreateFacilityDto,
            UpdateFacilityDto,
            Milestone,
            CreateMilestoneDto,
            UpdateMilestoneDto,
            Faq,
            CreateFaqDto,
            UpdateFaqDto,
            GalleryAlbum,
            CreateAlbumDto,
            UpdateAlbumDto,
            GalleryPhoto,
            AlbumSummary,
            AlbumWithPhotos,
            AddPhotosDto,
            UpdatePhotoDto,
            RejectedUpload,
            BulkUploadResponse,
            Admission,
            AdmissionStatus,
            AdmissionSummary,
            PaginatedAdmissionsResponse,
            UpdateAdmissionStatusDto,
            EnrollmentSubmitted,
            EnrollmentStep,
            EnrollmentDraft,
            StudentInfo,
            ParentInfo,
            AcademicInfo,
            Agreements,
            Gender,
            GradeLevel,
            StepResult,
            EnrollmentForm,
            ProgramOption,
            StepInfo,
            ContactMessage,
            CreateContactMessageDto,
            PaginatedContactMessagesResponse,
            MarkReadDto,
            UnreadCount,
            ContactPage,
            SiteSettings,
            SocialLink,
            SocialPlatform,
            UpdateSettingsDto,
            SettingsResponse,
            DashboardTab,
            DashboardCounts,
            DashboardResponse,
            HomePage,
            AboutPage,
            SiteStats,
            PaginatedNewsResponse,
            CalendarMonth,
            UploadResponse,
            DeleteUploadDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Public", description = "Pages of the public website"),
        (name = "Enrollment", description = "Online application wizard"),
        (name = "Contact", description = "Contact form and admin inbox"),
        (name = "Admin Auth", description = "Admin sign-in"),
        (name = "Dashboard", description = "Admin overview"),
        (name = "Gallery", description = "Albums and photos"),
        (name = "Admissions", description = "Application review"),
        (name = "Settings", description = "Site settings"),
        (name = "Uploads", description = "Image uploads")
    ),
    info(
        title = "SchoolHub API",
        version = "0.1.0",
        description = "Public website and admin content API for a secondary school, built with Rust, Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_admin_and_public_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/public/home"));
        assert!(doc.paths.paths.contains_key("/api/admin/admissions/{id}/status"));
        let schemes = doc.components.unwrap().security_schemes;
        assert!(schemes.contains_key("bearer_auth"));
    }
}
